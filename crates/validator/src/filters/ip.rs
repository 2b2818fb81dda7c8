//! IP address filter

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::value::type_name;
use crate::foundation::{
    Coerce, CoerceResult, Configurable, FilterError, Message, MessageKind, Messages,
};

/// Options for [`IpFilter`].
///
/// With neither `ipv4` nor `ipv6` set, both families are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpOptions {
    /// Accept IPv4 addresses.
    pub ipv4: bool,
    /// Accept IPv6 addresses.
    pub ipv6: bool,
    /// Reject private-use blocks.
    pub no_priv_range: bool,
    /// Reject reserved blocks.
    pub no_res_range: bool,
}

impl IpOptions {
    fn accepts(&self, addr: &IpAddr) -> bool {
        match addr {
            _ if !self.ipv4 && !self.ipv6 => true,
            IpAddr::V4(_) => self.ipv4,
            IpAddr::V6(_) => self.ipv6,
        }
    }
}

/// Validates an IPv4 or IPv6 literal.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::filters::IpFilter;
/// use strainer_validator::foundation::Coerce;
///
/// let public_v4 = IpFilter::new().ipv4(true).no_priv_range(true);
/// assert!(public_v4.coerce(&json!("8.8.8.8")).is_ok());
/// assert!(public_v4.coerce(&json!("192.168.1.1")).is_err());
/// assert!(public_v4.coerce(&json!("::1")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct IpFilter {
    options: IpOptions,
}

impl IpFilter {
    /// Creates a filter accepting any IP address.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter from options.
    pub fn from_options(options: IpOptions) -> Result<Self, FilterError> {
        Ok(Self { options })
    }

    /// Accepts IPv4.
    #[must_use = "builder methods must be chained or built"]
    pub fn ipv4(mut self, enabled: bool) -> Self {
        self.options.ipv4 = enabled;
        self
    }

    /// Accepts IPv6.
    #[must_use = "builder methods must be chained or built"]
    pub fn ipv6(mut self, enabled: bool) -> Self {
        self.options.ipv6 = enabled;
        self
    }

    /// Rejects private ranges.
    #[must_use = "builder methods must be chained or built"]
    pub fn no_priv_range(mut self, enabled: bool) -> Self {
        self.options.no_priv_range = enabled;
        self
    }

    /// Rejects reserved ranges.
    #[must_use = "builder methods must be chained or built"]
    pub fn no_res_range(mut self, enabled: bool) -> Self {
        self.options.no_res_range = enabled;
        self
    }
}

// ============================================================================
// ADDRESS BLOCKS
// ============================================================================

fn in_v4_block(addr: Ipv4Addr, network: [u8; 4], prefix: u32) -> bool {
    let mask = u32::MAX.checked_shl(32 - prefix).unwrap_or(0);
    u32::from(addr) & mask == u32::from(Ipv4Addr::from(network)) & mask
}

fn in_v6_block(addr: Ipv6Addr, network: Ipv6Addr, prefix: u32) -> bool {
    let mask = u128::MAX.checked_shl(128 - prefix).unwrap_or(0);
    u128::from(addr) & mask == u128::from(network) & mask
}

type V4Block = ([u8; 4], u32);
type V6Block = (Ipv6Addr, u32);

const V4_PRIVATE: &[V4Block] = &[
    ([10, 0, 0, 0], 8),
    ([172, 16, 0, 0], 12),
    ([192, 168, 0, 0], 16),
];

const V4_RESERVED: &[V4Block] = &[
    ([0, 0, 0, 0], 8),
    ([127, 0, 0, 0], 8),
    ([169, 254, 0, 0], 16),
    ([192, 0, 2, 0], 24),
    ([198, 51, 100, 0], 24),
    ([203, 0, 113, 0], 24),
    ([224, 0, 0, 0], 4),
    ([240, 0, 0, 0], 4),
];

const V6_PRIVATE: &[V6Block] = &[(Ipv6Addr::new(0xfc00, 0, 0, 0, 0, 0, 0, 0), 7)];

const V6_RESERVED: &[V6Block] = &[
    (Ipv6Addr::UNSPECIFIED, 128),
    (Ipv6Addr::LOCALHOST, 128),
    (Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0, 0), 96),
    (Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 0), 10),
    (Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0), 32),
    (Ipv6Addr::new(0xff00, 0, 0, 0, 0, 0, 0, 0), 8),
];

fn in_blocks(addr: &IpAddr, v4: &[V4Block], v6: &[V6Block]) -> bool {
    match *addr {
        IpAddr::V4(ip) => v4.iter().any(|&(net, len)| in_v4_block(ip, net, len)),
        IpAddr::V6(ip) => v6.iter().any(|&(net, len)| in_v6_block(ip, net, len)),
    }
}

fn is_private(addr: &IpAddr) -> bool {
    in_blocks(addr, V4_PRIVATE, V6_PRIVATE)
}

fn is_reserved(addr: &IpAddr) -> bool {
    in_blocks(addr, V4_RESERVED, V6_RESERVED)
}

impl Coerce for IpFilter {
    fn coerce(&self, input: &Value) -> CoerceResult {
        let Value::String(text) = input else {
            return Err(Message::type_mismatch("string", type_name(input)).into());
        };
        // std rejects leading zeros in dotted quads and zone identifiers.
        let Ok(addr) = text.parse::<IpAddr>() else {
            return Err(Message::invalid_format("IP address").into());
        };

        if !self.options.accepts(&addr) {
            let family = if addr.is_ipv4() { "IPv4" } else { "IPv6" };
            return Err(Message::new(
                MessageKind::Domain,
                "ip_family",
                format!("{family} addresses are not accepted"),
            )
            .with_param("family", family)
            .into());
        }

        let mut messages = Messages::new();
        if self.options.no_priv_range && is_private(&addr) {
            messages.push(Message::new(
                MessageKind::Domain,
                "private_range",
                "Address is in a private range",
            ));
        }
        if self.options.no_res_range && is_reserved(&addr) {
            messages.push(Message::new(
                MessageKind::Domain,
                "reserved_range",
                "Address is in a reserved range",
            ));
        }
        messages.into_result(input.clone())
    }
}

impl Configurable for IpFilter {
    type Options = IpOptions;

    fn options(&self) -> &IpOptions {
        &self.options
    }

    fn apply_options(&mut self, options: IpOptions) -> Result<(), FilterError> {
        self.options = options;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
