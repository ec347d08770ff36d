pub const DEFAULT_CONTROLLER: &str = "https://api.elcapitan.cloudgenix.com";
pub const SETTINGS_FILE: &str = "cloudgenix_settings.toml";

/// Diff text for an unchanged tag set; doubles as the "skip the write" marker.
pub const NO_CHANGES: &str = "no changes required.";

/// Site id the controller uses for unassigned elements.
pub const UNASSIGNED_SITE_ID: &str = "1";

/// Physical port that cannot be modified through the interfaces endpoint.
pub const RESERVED_INTERFACE_NAME: &str = "controller 2";

/// Fields accepted by the element update endpoint.
pub const ELEMENT_PUT_FIELDS: &[&str] = &[
    "cluster_member_id",
    "cluster_insertion_mode",
    "description",
    "site_id",
    "_schema",
    "_etag",
    "sw_obj",
    "id",
    "name",
    "l3_direct_private_wan_forwarding",
    "l3_lan_forwarding",
    "network_policysetstack_id",
    "priority_policysetstack_id",
    "spoke_ha_config",
    "tags",
];

/// Must be present in an element update, and must be null.
pub const ELEMENT_NULL_FIELD: &str = "sw_obj";

pub const MAX_LOGIN_ATTEMPTS: usize = 3;
