//! Built-in namespace definitions
//!
//! The stock registries and backup key lists for the three namespaces. Every
//! key listed for backup or legacy restore here must have a validator; the
//! completeness tests in `tests/completeness_test.rs` enforce it.

use crate::backup_keys::BackupKeys;
use crate::config::Namespace;
use crate::error::Result;
use crate::registry::{NamespaceRegistries, ValidatorRegistry};
use crate::validators::Validator;

const VOLUME_MAX: i32 = 100;

// =============================================================================
// System
// =============================================================================

const SYSTEM_BACKUP: &[&str] = &[
    "stay_awake_on_dock",
    "end_button_behavior",
    "bluetooth_discoverability",
    "bluetooth_discoverability_timeout",
    "font_scale",
    "dim_screen",
    "screen_off_timeout",
    "screen_brightness_mode",
    "screen_auto_brightness_adj",
    "vibrate_input_devices",
    "mode_ringer_streams_affected",
    "mute_streams_affected",
    "vibrate_on",
    "ringtone",
    "notification_sound",
    "alarm_alert",
    "text_auto_replace",
    "text_auto_caps",
    "text_auto_punctuate",
    "text_show_password",
    "time_12_24",
    "date_format",
    "accelerometer_rotation",
    "user_rotation",
    "dtmf_tone",
    "sound_effects_enabled",
    "haptic_feedback_enabled",
    "lockscreen_sounds_enabled",
    "pointer_speed",
    "show_touches",
];

const SYSTEM_LEGACY: &[&str] = &[
    "volume_voice",
    "volume_system",
    "volume_ring",
    "volume_music",
    "volume_alarm",
    "volume_notification",
    "volume_bluetooth_sco",
    "wifi_use_static_ip",
    "wifi_static_ip",
    "wifi_static_gateway",
    "wifi_static_netmask",
    "wifi_static_dns1",
    "wifi_static_dns2",
];

fn system_validators() -> Vec<(String, Validator)> {
    crate::validators! {
        "stay_awake_on_dock" => Validator::Boolean,
        "end_button_behavior" => Validator::integer_range(0, 3),
        "bluetooth_discoverability" => Validator::integer_range(0, 2),
        "bluetooth_discoverability_timeout" => Validator::NonNegativeInteger,
        "font_scale" => Validator::float_range(0.85, 1.3),
        "dim_screen" => Validator::Boolean,
        "screen_off_timeout" => Validator::NonNegativeInteger,
        "screen_brightness_mode" => Validator::Boolean,
        "screen_auto_brightness_adj" => Validator::float_range(-1.0, 1.0),
        "vibrate_input_devices" => Validator::Boolean,
        "mode_ringer_streams_affected" => Validator::NonNegativeInteger,
        "mute_streams_affected" => Validator::NonNegativeInteger,
        "vibrate_on" => Validator::Boolean,
        "ringtone" => Validator::Uri,
        "notification_sound" => Validator::Uri,
        "alarm_alert" => Validator::Uri,
        "text_auto_replace" => Validator::Boolean,
        "text_auto_caps" => Validator::Boolean,
        "text_auto_punctuate" => Validator::Boolean,
        "text_show_password" => Validator::Boolean,
        "time_12_24" => Validator::discrete(["12", "24"]),
        "date_format" => Validator::AnyString,
        "accelerometer_rotation" => Validator::Boolean,
        "user_rotation" => Validator::integer_range(0, 3),
        "dtmf_tone" => Validator::Boolean,
        "sound_effects_enabled" => Validator::Boolean,
        "haptic_feedback_enabled" => Validator::Boolean,
        "lockscreen_sounds_enabled" => Validator::Boolean,
        "pointer_speed" => Validator::float_range(-7.0, 7.0),
        "show_touches" => Validator::Boolean,
        "volume_voice" => Validator::integer_range(0, VOLUME_MAX),
        "volume_system" => Validator::integer_range(0, VOLUME_MAX),
        "volume_ring" => Validator::integer_range(0, VOLUME_MAX),
        "volume_music" => Validator::integer_range(0, VOLUME_MAX),
        "volume_alarm" => Validator::integer_range(0, VOLUME_MAX),
        "volume_notification" => Validator::integer_range(0, VOLUME_MAX),
        "volume_bluetooth_sco" => Validator::integer_range(0, VOLUME_MAX),
        "wifi_use_static_ip" => Validator::Boolean,
        "wifi_static_ip" => Validator::LenientIpAddress,
        "wifi_static_gateway" => Validator::LenientIpAddress,
        "wifi_static_netmask" => Validator::LenientIpAddress,
        "wifi_static_dns1" => Validator::LenientIpAddress,
        "wifi_static_dns2" => Validator::LenientIpAddress,
    }
}

// =============================================================================
// Global
// =============================================================================

const GLOBAL_BACKUP: &[&str] = &[
    "bugreport_in_power_menu",
    "stay_on_while_plugged_in",
    "auto_time",
    "auto_time_zone",
    "power_sounds_enabled",
    "dock_sounds_enabled",
    "charging_sounds_enabled",
    "usb_mass_storage_enabled",
    "network_recommendations_enabled",
    "wifi_networks_available_notification_on",
    "wifi_sleep_policy",
    "wifi_wakeup_enabled",
    "mode_ringer",
    "private_dns_mode",
    "private_dns_specifier",
    "low_power_trigger_level",
    "encoded_surround_output",
    "emergency_tone",
    "call_auto_retry",
    "zen_duration",
];

const GLOBAL_LEGACY: &[&str] = &[];

fn global_validators() -> Vec<(String, Validator)> {
    crate::validators! {
        "bugreport_in_power_menu" => Validator::Boolean,
        "stay_on_while_plugged_in" => Validator::integer_range(0, 15),
        "auto_time" => Validator::Boolean,
        "auto_time_zone" => Validator::Boolean,
        "power_sounds_enabled" => Validator::Boolean,
        "dock_sounds_enabled" => Validator::Boolean,
        "charging_sounds_enabled" => Validator::Boolean,
        "usb_mass_storage_enabled" => Validator::Boolean,
        "network_recommendations_enabled" => Validator::discrete_numeric([-1, 0, 1]),
        "wifi_networks_available_notification_on" => Validator::Boolean,
        "wifi_sleep_policy" => Validator::integer_range(0, 2),
        "wifi_wakeup_enabled" => Validator::Boolean,
        "mode_ringer" => Validator::integer_range(0, 2),
        "private_dns_mode" => Validator::discrete(["off", "opportunistic", "hostname"]),
        "private_dns_specifier" => Validator::AnyString,
        "low_power_trigger_level" => Validator::integer_range(0, 99),
        "encoded_surround_output" => Validator::discrete_numeric([0, 1, 2, 3]),
        "emergency_tone" => Validator::discrete(["0", "1", "2"]),
        "call_auto_retry" => Validator::Boolean,
        "zen_duration" => Validator::AnyInteger,
    }
}

// =============================================================================
// Secure
// =============================================================================

const SECURE_BACKUP: &[&str] = &[
    "accessibility_enabled",
    "enabled_accessibility_services",
    "touch_exploration_enabled",
    "accessibility_display_magnification_enabled",
    "accessibility_display_magnification_scale",
    "accessibility_captioning_enabled",
    "accessibility_captioning_locale",
    "accessibility_captioning_font_scale",
    "accessibility_captioning_foreground_color",
    "accessibility_captioning_background_color",
    "accessibility_captioning_typeface",
    "default_input_method",
    "enabled_input_methods",
    "selected_spell_checker",
    "spell_checker_enabled",
    "autofill_service",
    "long_press_timeout",
    "tts_default_rate",
    "tts_default_pitch",
    "tts_default_synth",
    "wake_gesture_enabled",
    "doze_enabled",
    "night_display_activated",
    "night_display_color_temperature",
    "notification_badging",
    "lock_screen_show_notifications",
    "lock_screen_custom_clock_face",
    "packages_to_clear_data_before_full_restore",
    "skip_first_use_hints",
    "sysui_qs_tiles",
];

const SECURE_LEGACY: &[&str] = &[
    "enabled_notification_listeners",
    "enabled_notification_assistant",
    "enabled_notification_policy_access_packages",
];

fn secure_validators() -> Vec<(String, Validator)> {
    crate::validators! {
        "accessibility_enabled" => Validator::Boolean,
        "enabled_accessibility_services" => Validator::component_list(':'),
        "touch_exploration_enabled" => Validator::Boolean,
        "accessibility_display_magnification_enabled" => Validator::Boolean,
        "accessibility_display_magnification_scale" => Validator::float_range(1.0, 8.0),
        "accessibility_captioning_enabled" => Validator::Boolean,
        "accessibility_captioning_locale" => Validator::Locale,
        "accessibility_captioning_font_scale" => Validator::float_range(0.5, 2.0),
        "accessibility_captioning_foreground_color" => Validator::Color,
        "accessibility_captioning_background_color" => Validator::Color,
        "accessibility_captioning_typeface" =>
            Validator::discrete(["DEFAULT", "MONOSPACE", "SANS_SERIF", "SERIF"]),
        "default_input_method" => Validator::NullableComponentName,
        "enabled_input_methods" => Validator::AnyString,
        "selected_spell_checker" => Validator::NullableComponentName,
        "spell_checker_enabled" => Validator::Boolean,
        "autofill_service" => Validator::NullableComponentName,
        "long_press_timeout" => Validator::NonNegativeInteger,
        "tts_default_rate" => Validator::NonNegativeInteger,
        "tts_default_pitch" => Validator::NonNegativeInteger,
        "tts_default_synth" => Validator::PackageName,
        "wake_gesture_enabled" => Validator::Boolean,
        "doze_enabled" => Validator::Boolean,
        "night_display_activated" => Validator::Boolean,
        "night_display_color_temperature" => Validator::NonNegativeInteger,
        "notification_badging" => Validator::Boolean,
        "lock_screen_show_notifications" => Validator::Boolean,
        "lock_screen_custom_clock_face" => Validator::JsonObject,
        "packages_to_clear_data_before_full_restore" => Validator::package_list(';'),
        "skip_first_use_hints" => Validator::Boolean,
        "sysui_qs_tiles" => Validator::AnyString,
        "enabled_notification_listeners" => Validator::component_list(':'),
        "enabled_notification_assistant" => Validator::NullableComponentName,
        "enabled_notification_policy_access_packages" => Validator::package_list(':'),
    }
}

// =============================================================================
// Accessors
// =============================================================================

/// Stock registry for `namespace`
///
/// # Errors
///
/// Returns the registry builder's error if the stock source list is
/// ambiguous. The tests assert this never happens.
pub fn registry(namespace: Namespace) -> Result<ValidatorRegistry> {
    let entries = match namespace {
        Namespace::System => system_validators(),
        Namespace::Global => global_validators(),
        Namespace::Secure => secure_validators(),
    };
    ValidatorRegistry::from_entries(namespace, entries)
}

/// Stock registries for every namespace
///
/// # Errors
///
/// Returns the first registry construction error.
pub fn registries() -> Result<NamespaceRegistries> {
    NamespaceRegistries::new(
        registry(Namespace::System)?,
        registry(Namespace::Global)?,
        registry(Namespace::Secure)?,
    )
}

/// Stock backup and legacy key lists for `namespace`
#[must_use]
pub fn backup_keys(namespace: Namespace) -> BackupKeys {
    let (backup, legacy) = match namespace {
        Namespace::System => (SYSTEM_BACKUP, SYSTEM_LEGACY),
        Namespace::Global => (GLOBAL_BACKUP, GLOBAL_LEGACY),
        Namespace::Secure => (SECURE_BACKUP, SECURE_LEGACY),
    };
    BackupKeys::new(namespace)
        .backup(backup.iter().copied())
        .legacy(legacy.iter().copied())
}

/// Stock key lists for every namespace, in [`Namespace::ALL`] order
#[must_use]
pub fn all_backup_keys() -> Vec<BackupKeys> {
    Namespace::ALL.into_iter().map(backup_keys).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_registries_build() {
        for ns in Namespace::ALL {
            let registry = registry(ns).unwrap();
            assert_eq!(registry.namespace(), ns);
            assert!(!registry.is_empty());
        }
    }

    #[test]
    fn test_stock_lists_have_no_duplicates() {
        for keys in all_backup_keys() {
            let mut seen = std::collections::HashSet::new();
            for key in keys.restorable() {
                assert!(seen.insert(key), "{} lists '{key}' twice", keys.namespace);
            }
        }
    }
}
