// Settings form state - no dioxus imports needed here
use super::upload::AssetKind;
use crate::services::client::SiteSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsTab {
    General,
    Contact,
    Social,
    Seo,
    Advanced,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 5] = [
        SettingsTab::General,
        SettingsTab::Contact,
        SettingsTab::Social,
        SettingsTab::Seo,
        SettingsTab::Advanced,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsTab::General => "General",
            SettingsTab::Contact => "Contact",
            SettingsTab::Social => "Social Media",
            SettingsTab::Seo => "SEO",
            SettingsTab::Advanced => "Advanced",
        }
    }

    pub fn fields(&self) -> &'static [SettingsField] {
        match self {
            SettingsTab::General => &[SettingsField::SiteName, SettingsField::Tagline],
            SettingsTab::Contact => &[
                SettingsField::ContactEmail,
                SettingsField::ContactPhone,
                SettingsField::Address,
            ],
            SettingsTab::Social => &[
                SettingsField::FacebookUrl,
                SettingsField::TwitterUrl,
                SettingsField::InstagramUrl,
            ],
            SettingsTab::Seo => &[
                SettingsField::MetaTitle,
                SettingsField::MetaDescription,
                SettingsField::MetaKeywords,
            ],
            SettingsTab::Advanced => &[SettingsField::AnalyticsId],
        }
    }
}

/// Plain text fields of the settings record. The copyright text (rich
/// text), the two images and the maintenance flag have dedicated actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    SiteName,
    Tagline,
    ContactEmail,
    ContactPhone,
    Address,
    FacebookUrl,
    TwitterUrl,
    InstagramUrl,
    MetaTitle,
    MetaDescription,
    MetaKeywords,
    AnalyticsId,
}

impl SettingsField {
    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::SiteName => "Site name",
            SettingsField::Tagline => "Tagline",
            SettingsField::ContactEmail => "Contact email",
            SettingsField::ContactPhone => "Contact phone",
            SettingsField::Address => "Address",
            SettingsField::FacebookUrl => "Facebook URL",
            SettingsField::TwitterUrl => "Twitter URL",
            SettingsField::InstagramUrl => "Instagram URL",
            SettingsField::MetaTitle => "Meta title",
            SettingsField::MetaDescription => "Meta description",
            SettingsField::MetaKeywords => "Meta keywords",
            SettingsField::AnalyticsId => "Analytics ID",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            SettingsField::SiteName => "The Daily Ledger",
            SettingsField::Tagline => "News that matters",
            SettingsField::ContactEmail => "newsroom@example.com",
            SettingsField::ContactPhone => "+1 555 0100",
            SettingsField::Address => "Street, city, country",
            SettingsField::FacebookUrl => "https://facebook.com/yourpage",
            SettingsField::TwitterUrl => "https://twitter.com/yourhandle",
            SettingsField::InstagramUrl => "https://instagram.com/yourhandle",
            SettingsField::MetaTitle => "Title shown in search results",
            SettingsField::MetaDescription => "Short description for search engines",
            SettingsField::MetaKeywords => "news, politics, sport",
            SettingsField::AnalyticsId => "G-XXXXXXXXXX",
        }
    }

    pub fn input_type(&self) -> &'static str {
        match self {
            SettingsField::ContactEmail => "email",
            SettingsField::ContactPhone => "tel",
            SettingsField::FacebookUrl | SettingsField::TwitterUrl | SettingsField::InstagramUrl => {
                "url"
            }
            _ => "text",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, SettingsField::Address | SettingsField::MetaDescription)
    }

    pub fn get<'a>(&self, settings: &'a SiteSettings) -> &'a str {
        match self {
            SettingsField::SiteName => &settings.site_name,
            SettingsField::Tagline => &settings.tagline,
            SettingsField::ContactEmail => &settings.contact_email,
            SettingsField::ContactPhone => &settings.contact_phone,
            SettingsField::Address => &settings.address,
            SettingsField::FacebookUrl => &settings.facebook_url,
            SettingsField::TwitterUrl => &settings.twitter_url,
            SettingsField::InstagramUrl => &settings.instagram_url,
            SettingsField::MetaTitle => &settings.meta_title,
            SettingsField::MetaDescription => &settings.meta_description,
            SettingsField::MetaKeywords => &settings.meta_keywords,
            SettingsField::AnalyticsId => &settings.analytics_id,
        }
    }

    pub fn set(&self, settings: &mut SiteSettings, value: String) {
        let slot = match self {
            SettingsField::SiteName => &mut settings.site_name,
            SettingsField::Tagline => &mut settings.tagline,
            SettingsField::ContactEmail => &mut settings.contact_email,
            SettingsField::ContactPhone => &mut settings.contact_phone,
            SettingsField::Address => &mut settings.address,
            SettingsField::FacebookUrl => &mut settings.facebook_url,
            SettingsField::TwitterUrl => &mut settings.twitter_url,
            SettingsField::InstagramUrl => &mut settings.instagram_url,
            SettingsField::MetaTitle => &mut settings.meta_title,
            SettingsField::MetaDescription => &mut settings.meta_description,
            SettingsField::MetaKeywords => &mut settings.meta_keywords,
            SettingsField::AnalyticsId => &mut settings.analytics_id,
        };
        *slot = value;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Flash {
    Success(String),
    Error(String),
}

impl Flash {
    pub fn message(&self) -> &str {
        match self {
            Flash::Success(message) | Flash::Error(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Flash::Success(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SettingsState {
    pub settings: SiteSettings,
    pub active_tab: SettingsTab,
    pub is_loading: bool,
    pub is_saving: bool,
    pub uploading: Option<AssetKind>,
    pub flash: Option<Flash>,
    /// Bumped on every new flash so a stale dismiss timer cannot hide a newer one
    pub flash_seq: u64,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            settings: SiteSettings::default(),
            active_tab: SettingsTab::General,
            is_loading: true,
            is_saving: false,
            uploading: None,
            flash: None,
            flash_seq: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SettingsAction {
    Loaded(SiteSettings),
    LoadFailed(String),
    SelectTab(SettingsTab),
    SetField(SettingsField, String),
    SetCopyright(String),
    SetMaintenance(bool),
    SetSaving(bool),
    Saved(SiteSettings, String),
    SetUploading(Option<AssetKind>),
    AssetUploaded(AssetKind, String, String),
    ShowFlash(Flash),
    DismissFlash(u64),
}

impl SettingsState {
    pub fn is_new(&self) -> bool {
        self.settings.id.is_none()
    }

    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_saving || self.uploading.is_some()
    }

    pub fn reduce_in_place(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::Loaded(settings) => {
                self.settings = settings;
                self.is_loading = false;
            }
            SettingsAction::LoadFailed(message) => {
                self.is_loading = false;
                self.show_flash(Flash::Error(message));
            }
            SettingsAction::SelectTab(tab) => {
                self.active_tab = tab;
            }
            SettingsAction::SetField(field, value) => {
                field.set(&mut self.settings, value);
            }
            SettingsAction::SetCopyright(html) => {
                self.settings.copyright_text = html;
            }
            SettingsAction::SetMaintenance(enabled) => {
                self.settings.maintenance_mode = enabled;
            }
            SettingsAction::SetSaving(saving) => {
                self.is_saving = saving;
            }
            SettingsAction::Saved(settings, message) => {
                self.settings = settings;
                self.is_saving = false;
                self.show_flash(Flash::Success(message));
            }
            SettingsAction::SetUploading(kind) => {
                self.uploading = kind;
            }
            SettingsAction::AssetUploaded(kind, url, message) => {
                match kind {
                    AssetKind::Logo => self.settings.logo_url = Some(url),
                    AssetKind::Favicon => self.settings.favicon_url = Some(url),
                }
                self.uploading = None;
                self.show_flash(Flash::Success(message));
            }
            SettingsAction::ShowFlash(flash) => {
                self.show_flash(flash);
            }
            SettingsAction::DismissFlash(seq) => {
                if seq == self.flash_seq {
                    self.flash = None;
                }
            }
        }
    }

    fn show_flash(&mut self, flash: Flash) {
        self.flash_seq += 1;
        self.flash = Some(flash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_text_field_on_exactly_one_tab() {
        let mut seen = Vec::new();
        for tab in SettingsTab::ALL {
            for field in tab.fields() {
                assert!(!seen.contains(field), "{:?} listed twice", field);
                seen.push(*field);
            }
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn test_field_set_and_get() {
        let mut state = SettingsState::default();
        state.reduce_in_place(SettingsAction::SetField(
            SettingsField::MetaKeywords,
            "news, local".to_string(),
        ));
        assert_eq!(
            SettingsField::MetaKeywords.get(&state.settings),
            "news, local"
        );
        assert_eq!(state.settings.meta_keywords, "news, local");
    }

    #[test]
    fn test_upload_updates_matching_field() {
        let mut state = SettingsState::default();
        state.reduce_in_place(SettingsAction::SetUploading(Some(AssetKind::Favicon)));
        assert!(state.is_busy());

        state.reduce_in_place(SettingsAction::Loaded(SiteSettings::default()));
        state.reduce_in_place(SettingsAction::AssetUploaded(
            AssetKind::Favicon,
            "/media/favicon.ico".to_string(),
            "Favicon uploaded".to_string(),
        ));
        assert_eq!(
            state.settings.favicon_url.as_deref(),
            Some("/media/favicon.ico")
        );
        assert!(state.settings.logo_url.is_none());
        assert!(!state.is_busy());
    }

    #[test]
    fn test_stale_dismiss_keeps_newer_flash() {
        let mut state = SettingsState::default();
        state.reduce_in_place(SettingsAction::ShowFlash(Flash::Error("first".into())));
        let first_seq = state.flash_seq;
        state.reduce_in_place(SettingsAction::ShowFlash(Flash::Success("second".into())));

        state.reduce_in_place(SettingsAction::DismissFlash(first_seq));
        assert_eq!(state.flash, Some(Flash::Success("second".into())));

        state.reduce_in_place(SettingsAction::DismissFlash(state.flash_seq));
        assert!(state.flash.is_none());
    }

    #[test]
    fn test_failed_save_leaves_edits_untouched() {
        let mut state = SettingsState::default();
        state.reduce_in_place(SettingsAction::Loaded(SiteSettings::default()));
        state.reduce_in_place(SettingsAction::SetField(
            SettingsField::SiteName,
            "Edited".to_string(),
        ));
        state.reduce_in_place(SettingsAction::SetSaving(true));
        state.reduce_in_place(SettingsAction::SetSaving(false));
        state.reduce_in_place(SettingsAction::ShowFlash(Flash::Error("Server down".into())));

        assert_eq!(state.settings.site_name, "Edited");
        assert!(state.is_new());
    }
}
