//! Catalog reconciliation: merging the installable and installed lists into
//! render records.
//!
//! Everything in this module is a pure function over a [`ReconcileContext`];
//! the rendering layer (table, dropdown, details pane) consumes the records
//! produced here and never touches the raw lists.

use crate::catalog::LanguageEntry;
use crate::version::compare_versions;
use std::cmp::Ordering;

/// The full input to a reconciliation pass: both current lists plus the two
/// panel settings that affect the output.
///
/// This replaces a pair of shared mutable lists with one explicit value, so a
/// merge can never observe one fresh and one stale list.
#[derive(Debug, Clone, Default)]
pub struct ReconcileContext {
    /// Languages offered by the central catalog server.
    pub installable: Vec<LanguageEntry>,
    /// Languages present on the local server.
    pub installed: Vec<LanguageEntry>,
    /// Code of the server's current default language.
    pub default_language: String,
    /// Whether beta packs appear in the installable dropdown.
    pub show_beta: bool,
}

/// Upgrade column for one installed language.
#[derive(Debug, Clone, PartialEq)]
pub enum UpgradeStatus {
    /// A newer pack exists on the catalog. Diffs are catalog minus installed
    /// and may be negative; they are rendered as-is.
    Available {
        percent_translated_diff: f64,
        subtitle_count_diff: i64,
        /// Download size of the newer pack, in bytes.
        zip_size: u64,
    },
    /// A catalog entry with the same code exists but is not newer.
    UpToDate,
    /// No catalog entry matches this code (or the catalog list is empty);
    /// the row renders without an upgrade cell.
    Unknown,
}

/// Delete column for one installed language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAction {
    /// The whole pack can be removed.
    Full,
    /// English only: the pack itself stays, but its subtitles can go.
    SubtitlesOnly,
    /// Nothing to delete (English with no subtitles).
    None,
}

/// One row of the installed-languages table.
#[derive(Debug, Clone, PartialEq)]
pub struct InstalledRow {
    pub code: String,
    pub name: String,
    pub subtitle_count: u32,
    pub percent_translated: f64,
    /// False exactly when this language is the configured default.
    pub can_set_default: bool,
    pub upgrade: UpgradeStatus,
    pub delete: DeleteAction,
}

/// One item of the installable-languages dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallableOption {
    pub code: String,
    pub name: String,
    pub beta: bool,
}

/// Details pane shown for the language currently selected in the dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionDetails {
    pub subtitle_count: u32,
    pub percent_translated: f64,
    /// Download size in bytes.
    pub zip_size: u64,
    /// On-disk size in bytes.
    pub package_size: u64,
    pub num_exercises: u32,
}

impl ReconcileContext {
    pub fn new(default_language: &str, show_beta: bool) -> Self {
        Self {
            installable: Vec::new(),
            installed: Vec::new(),
            default_language: default_language.to_string(),
            show_beta,
        }
    }

    /// Find the catalog entry matching a code. Linear scan: both lists are
    /// bounded by the number of supported languages.
    pub fn find_installable(&self, code: &str) -> Option<&LanguageEntry> {
        self.installable.iter().find(|lang| lang.code == code)
    }

    /// Build the installed-table rows.
    ///
    /// Entries without a display name are skipped. Each row carries its
    /// set-default eligibility, its upgrade status against the catalog, and
    /// which delete action (if any) applies.
    pub fn installed_rows(&self) -> Vec<InstalledRow> {
        self.installed
            .iter()
            .filter(|lang| !lang.name.is_empty())
            .map(|lang| InstalledRow {
                code: lang.code.clone(),
                name: lang.name.clone(),
                subtitle_count: lang.subtitle_count,
                percent_translated: lang.percent_translated,
                can_set_default: lang.code != self.default_language,
                upgrade: self.upgrade_status(lang),
                delete: delete_action(lang),
            })
            .collect()
    }

    /// Upgrade status of one installed entry against the catalog.
    ///
    /// A pack is upgradeable when the catalog entry targets a newer software
    /// version, or the same software version with a higher pack revision; the
    /// software version dimension dominates.
    fn upgrade_status(&self, installed: &LanguageEntry) -> UpgradeStatus {
        let Some(candidate) = self.find_installable(&installed.code) else {
            return UpgradeStatus::Unknown;
        };

        let software_cmp =
            compare_versions(&candidate.software_version, &installed.software_version);
        let upgradeable = software_cmp == Ordering::Greater
            || (software_cmp == Ordering::Equal
                && candidate.language_pack_version > installed.language_pack_version);

        if upgradeable {
            UpgradeStatus::Available {
                percent_translated_diff: candidate.percent_translated
                    - installed.percent_translated,
                subtitle_count_diff: i64::from(candidate.subtitle_count)
                    - i64::from(installed.subtitle_count),
                zip_size: candidate.zip_size,
            }
        } else {
            UpgradeStatus::UpToDate
        }
    }

    /// Build the installable dropdown.
    ///
    /// Excluded: codes already installed, packs with nothing to install
    /// (zero translation and zero subtitles), and beta packs unless the
    /// show-beta toggle is on. Always computed from the context's current
    /// lists.
    pub fn installable_options(&self) -> Vec<InstallableOption> {
        self.installable
            .iter()
            .filter(|lang| !self.installed.iter().any(|i| i.code == lang.code))
            .filter(|lang| lang.percent_translated > 0.0 || lang.subtitle_count > 0)
            .filter(|lang| self.show_beta || !lang.beta)
            .map(|lang| InstallableOption {
                code: lang.code.clone(),
                name: lang.name.clone(),
                beta: lang.beta,
            })
            .collect()
    }

    /// Details for a dropdown selection; `None` when the code is not (or no
    /// longer) on the catalog list.
    pub fn selection_details(&self, code: &str) -> Option<SelectionDetails> {
        self.find_installable(code).map(|lang| SelectionDetails {
            subtitle_count: lang.subtitle_count,
            percent_translated: lang.percent_translated,
            zip_size: lang.zip_size,
            package_size: lang.package_size,
            num_exercises: lang.num_exercises,
        })
    }
}

/// English is never fully deletable; its subtitles are, when it has any.
fn delete_action(lang: &LanguageEntry) -> DeleteAction {
    if lang.code != "en" {
        DeleteAction::Full
    } else if lang.subtitle_count > 0 {
        DeleteAction::SubtitlesOnly
    } else {
        DeleteAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installed(code: &str, name: &str, sw: &str, pack: u32) -> LanguageEntry {
        let mut e = LanguageEntry::new(code, name);
        e.software_version = sw.to_string();
        e.language_pack_version = pack;
        e
    }

    fn installable(code: &str, name: &str, sw: &str, pack: u32) -> LanguageEntry {
        installed(code, name, sw, pack)
    }

    fn ctx() -> ReconcileContext {
        ReconcileContext::new("en", false)
    }

    // ==================== Upgrade Eligibility Tests ====================

    #[test]
    fn test_newer_pack_version_is_upgradeable() {
        let mut context = ctx();
        let mut old = installed("fr", "Français", "1.0", 3);
        old.percent_translated = 60.0;
        old.subtitle_count = 100;
        let mut new = installable("fr", "Français", "1.0", 5);
        new.percent_translated = 75.0;
        new.subtitle_count = 130;
        new.zip_size = 5_000_000;
        context.installed = vec![old];
        context.installable = vec![new];

        let rows = context.installed_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].upgrade,
            UpgradeStatus::Available {
                percent_translated_diff: 15.0,
                subtitle_count_diff: 30,
                zip_size: 5_000_000,
            }
        );
    }

    #[test]
    fn test_newer_software_version_dominates_pack_version() {
        let mut context = ctx();
        context.installed = vec![installed("fr", "Français", "1.0", 5)];
        context.installable = vec![installable("fr", "Français", "0.9", 99)];

        let rows = context.installed_rows();
        assert_eq!(rows[0].upgrade, UpgradeStatus::UpToDate);
    }

    #[test]
    fn test_newer_software_version_is_upgradeable_despite_lower_pack() {
        let mut context = ctx();
        context.installed = vec![installed("fr", "Français", "1.0", 9)];
        context.installable = vec![installable("fr", "Français", "1.1", 1)];

        let rows = context.installed_rows();
        assert!(matches!(rows[0].upgrade, UpgradeStatus::Available { .. }));
    }

    #[test]
    fn test_equal_versions_up_to_date() {
        let mut context = ctx();
        context.installed = vec![installed("fr", "Français", "1.2", 4)];
        context.installable = vec![installable("fr", "Français", "1.2.0", 4)];

        let rows = context.installed_rows();
        assert_eq!(rows[0].upgrade, UpgradeStatus::UpToDate);
    }

    #[test]
    fn test_no_catalog_match_is_unknown_not_error() {
        let mut context = ctx();
        context.installed = vec![installed("zz", "Zz", "1.0", 1)];

        let rows = context.installed_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].upgrade, UpgradeStatus::Unknown);
    }

    #[test]
    fn test_diffs_can_be_negative() {
        let mut context = ctx();
        let mut old = installed("es", "Español", "1.0", 1);
        old.percent_translated = 90.0;
        old.subtitle_count = 500;
        let mut new = installable("es", "Español", "1.0", 2);
        new.percent_translated = 85.0;
        new.subtitle_count = 450;
        context.installed = vec![old];
        context.installable = vec![new];

        match &context.installed_rows()[0].upgrade {
            UpgradeStatus::Available {
                percent_translated_diff,
                subtitle_count_diff,
                ..
            } => {
                assert_eq!(*percent_translated_diff, -5.0);
                assert_eq!(*subtitle_count_diff, -50);
            }
            other => panic!("expected Available, got {:?}", other),
        }
    }

    // ==================== Row Filtering Tests ====================

    #[test]
    fn test_nameless_entries_are_skipped() {
        let mut context = ctx();
        context.installed = vec![
            installed("fr", "Français", "1.0", 1),
            installed("xx", "", "1.0", 1),
        ];

        let rows = context.installed_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "fr");
    }

    #[test]
    fn test_default_language_cannot_be_set_default() {
        let mut context = ReconcileContext::new("fr", false);
        context.installed = vec![
            installed("fr", "Français", "1.0", 1),
            installed("es", "Español", "1.0", 1),
        ];

        let rows = context.installed_rows();
        assert!(!rows[0].can_set_default);
        assert!(rows[1].can_set_default);
    }

    // ==================== Delete Action Tests ====================

    #[test]
    fn test_non_english_fully_deletable() {
        let mut context = ctx();
        context.installed = vec![installed("fr", "Français", "1.0", 1)];
        assert_eq!(context.installed_rows()[0].delete, DeleteAction::Full);
    }

    #[test]
    fn test_english_with_subtitles_deletes_subtitles_only() {
        let mut context = ctx();
        let mut en = installed("en", "English", "1.0", 1);
        en.subtitle_count = 42;
        context.installed = vec![en];
        assert_eq!(
            context.installed_rows()[0].delete,
            DeleteAction::SubtitlesOnly
        );
    }

    #[test]
    fn test_english_without_subtitles_has_no_delete() {
        let mut context = ctx();
        context.installed = vec![installed("en", "English", "1.0", 1)];
        assert_eq!(context.installed_rows()[0].delete, DeleteAction::None);
    }

    // ==================== Dropdown Tests ====================

    #[test]
    fn test_dropdown_excludes_installed_codes() {
        let mut context = ctx();
        let mut fr = installable("fr", "Français", "1.0", 1);
        fr.percent_translated = 50.0;
        let mut de = installable("de", "Deutsch", "1.0", 1);
        de.percent_translated = 50.0;
        context.installable = vec![fr, de];
        context.installed = vec![installed("fr", "Français", "1.0", 1)];

        let options = context.installable_options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].code, "de");
    }

    #[test]
    fn test_dropdown_excludes_empty_packs() {
        let mut context = ctx();
        // Nothing translated, no subtitles: nothing useful to install.
        context.installable = vec![installable("xx", "Empty", "1.0", 1)];

        assert!(context.installable_options().is_empty());
    }

    #[test]
    fn test_dropdown_includes_subtitle_only_packs() {
        let mut context = ctx();
        let mut xx = installable("xx", "Subs", "1.0", 1);
        xx.subtitle_count = 10;
        context.installable = vec![xx];

        assert_eq!(context.installable_options().len(), 1);
    }

    #[test]
    fn test_dropdown_hides_beta_by_default() {
        let mut context = ctx();
        let mut beta = installable("yy", "Beta", "1.0", 1);
        beta.percent_translated = 30.0;
        beta.beta = true;
        context.installable = vec![beta];

        assert!(context.installable_options().is_empty());

        context.show_beta = true;
        let options = context.installable_options();
        assert_eq!(options.len(), 1);
        assert!(options[0].beta);
    }

    // ==================== Selection Details Tests ====================

    #[test]
    fn test_selection_details_for_catalog_entry() {
        let mut context = ctx();
        let mut fr = installable("fr", "Français", "1.0", 1);
        fr.subtitle_count = 800;
        fr.percent_translated = 66.0;
        fr.zip_size = 12_000_000;
        fr.package_size = 30_000_000;
        fr.num_exercises = 120;
        context.installable = vec![fr];

        let details = context.selection_details("fr").expect("Should be found");
        assert_eq!(details.subtitle_count, 800);
        assert_eq!(details.percent_translated, 66.0);
        assert_eq!(details.zip_size, 12_000_000);
        assert_eq!(details.package_size, 30_000_000);
        assert_eq!(details.num_exercises, 120);
    }

    #[test]
    fn test_selection_details_unknown_code() {
        assert!(ctx().selection_details("zz").is_none());
    }
}
