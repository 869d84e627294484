use crate::platform::Platform;

/// Hardware wallet switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HardwareWalletConfig {
    /// `[hardware_wallets.ledger_nano] enable_usb_transport`
    pub enable_usb_transport: bool,
}

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub hardware_wallets: HardwareWalletConfig,

    /// UI locale; may be empty, the presenter then uses its own default.
    pub locale: String,

    /// Platform override (`[platform] os`). `None` means "the one we run on".
    pub platform_override: Option<Platform>,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// Missing keys map to empty values; nothing is validated here.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            hardware_wallets: HardwareWalletConfig {
                enable_usb_transport: toml_value
                    .get("hardware_wallets")
                    .and_then(|h| h.get("ledger_nano"))
                    .and_then(|l| l.get("enable_usb_transport"))
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false),
            },
            locale: toml_value
                .get("ui")
                .and_then(|u| u.get("locale"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            platform_override: toml_value
                .get("platform")
                .and_then(|p| p.get("os"))
                .and_then(|v| v.as_str())
                .and_then(|s| s.parse::<Platform>().ok()),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig（所有字段为空/默认值）
    pub fn empty() -> Self {
        Self {
            hardware_wallets: HardwareWalletConfig::default(),
            locale: String::new(),
            platform_override: None,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform_override.unwrap_or_else(Platform::current)
    }

    /// Whether the serial/USB transport is offered next to the wireless one.
    ///
    /// Both the platform and the configuration have to allow it.
    pub fn alt_transport_enabled(&self) -> bool {
        self.platform().supports_serial_transport() && self.hardware_wallets.enable_usb_transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_all_sections() {
        let toml_str = r#"
            [hardware_wallets.ledger_nano]
            enable_usb_transport = true

            [ui]
            locale = "ja-JP"

            [platform]
            os = "android"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert!(config.hardware_wallets.enable_usb_transport);
        assert_eq!(config.locale, "ja-JP");
        assert_eq!(config.platform_override, Some(Platform::Android));
        assert!(config.alt_transport_enabled());
    }

    #[test]
    fn test_from_toml_returns_empty_values_when_missing() {
        let toml_value: Value = toml::from_str("").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_usb_flag_alone_does_not_enable_alt_transport_off_android() {
        let toml_str = r#"
            [hardware_wallets.ledger_nano]
            enable_usb_transport = true

            [platform]
            os = "ios"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert!(!config.alt_transport_enabled());
    }

    #[test]
    fn test_android_without_usb_flag_keeps_alt_transport_disabled() {
        let mut config = AppConfig::empty();
        config.platform_override = Some(Platform::Android);
        assert!(!config.alt_transport_enabled());
    }
}
