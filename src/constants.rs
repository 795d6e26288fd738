/// Default locations and thresholds shared by the rebuild tools.
/// Paths are relative to the repository root unless noted otherwise.

// OUI inputs
pub const IEEE_PRIMARY_SOURCE: &str = "data/resources/oui.txt";
pub const IEEE_SECONDARY_SOURCE: &str = "data/resources/oui 2.txt";
pub const OUI_OVERRIDE_SOURCE: &str = "data/strangelab/StrangeLab/oui/oui_combined.txt";

// OUI outputs
pub const OUI_COMBINED_OUT: &str = "OUI/oui_combined.txt";
pub const OUI_DEVSTATION_OUT: &str = "apps/dev-station/DevStation/Resources/OUI.txt";
/// Relative to the user's home directory.
pub const OUI_RUNTIME_OUT: &str = "SODS/oui/oui_combined.txt";

pub const MIN_OUI_ENTRIES: usize = 1_000;

// Bluetooth SIG registries
pub const COMPANY_URL: &str = "https://bitbucket.org/bluetooth-SIG/public/raw/HEAD/assigned_numbers/company_identifiers/company_identifiers.yaml";
pub const SERVICE_URL: &str =
    "https://bitbucket.org/bluetooth-SIG/public/raw/HEAD/assigned_numbers/uuids/service_uuids.yaml";
pub const CHARACTERISTIC_URL: &str = "https://bitbucket.org/bluetooth-SIG/public/raw/HEAD/assigned_numbers/uuids/characteristic_uuids.yaml";
pub const DESCRIPTOR_URL: &str =
    "https://bitbucket.org/bluetooth-SIG/public/raw/HEAD/assigned_numbers/uuids/descriptors.yaml";

pub const BLE_USER_AGENT: &str = "SODS-refresh-ble-metadata/1.0";
pub const BLE_FETCH_TIMEOUT_SECS: u64 = 30;

pub const BLE_RESOURCES_DIR: &str = "apps/dev-station/DevStation/Resources";
pub const BLE_COMPANY_FILE: &str = "BLECompanyIDs.txt";
pub const BLE_ASSIGNED_FILE: &str = "BLEAssignedNumbers.txt";
pub const BLE_SERVICE_FILE: &str = "BLEServiceUUIDs.txt";

pub const MIN_COMPANIES: usize = 3_900;
pub const MIN_ASSIGNED: usize = 600;
pub const MIN_SERVICES: usize = 75;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "vendor_tables.toml";
