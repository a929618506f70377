//! Field generators — finite, ordered, resettable value sequences.
//!
//! Each generator owns its own cursor and signals exhaustion by returning
//! the sentinel from [`GenValue::nil`]. Once exhausted, `next` keeps
//! returning the sentinel until `reset`, which re-derives the cursor from
//! the original configuration so replay is exact.

use super::types::{FieldSpec, GeneratorType};
use super::value::GenValue;
use ipnet::{IpAddrRange, IpNet, Ipv4AddrRange, Ipv6AddrRange};

/// A finite, ordered, resettable source of values for one named field.
pub trait FieldGenerator: std::fmt::Debug {
    /// The next value in the cycle, or the sentinel once exhausted.
    fn next(&mut self) -> GenValue;

    /// Rewind to the start of the cycle, as if freshly constructed.
    fn reset(&mut self);

    /// Number of legitimate values one full cycle yields.
    fn cycle_len(&self) -> u64;
}

// ============================================================================
// Repeat
// ============================================================================

/// Yields a fixed value a fixed number of times, then exhausts.
#[derive(Debug)]
pub struct RepeatGen {
    value: GenValue,
    count: u32,
    emitted: u32,
}

impl RepeatGen {
    /// A generator yielding `value` exactly `count` times per cycle.
    ///
    /// `count` may be 0, in which case the very first `next` already
    /// returns the sentinel.
    pub fn new(value: GenValue, count: u32) -> Result<Self, String> {
        if value.is_nil() {
            return Err("repeat value must not be the sentinel".to_string());
        }
        Ok(Self {
            value,
            count,
            emitted: 0,
        })
    }
}

impl FieldGenerator for RepeatGen {
    fn next(&mut self) -> GenValue {
        if self.emitted < self.count {
            self.emitted += 1;
            self.value.clone()
        } else {
            GenValue::nil()
        }
    }

    fn reset(&mut self) {
        self.emitted = 0;
    }

    fn cycle_len(&self) -> u64 {
        u64::from(self.count)
    }
}

// ============================================================================
// Cidr
// ============================================================================

/// Enumerates every address of a CIDR block in ascending order.
///
/// The cycle covers the full block, network through broadcast inclusive,
/// so an IPv4 `/24` yields 256 addresses.
#[derive(Debug)]
pub struct CidrGen {
    net: IpNet,
    cursor: IpAddrRange,
}

impl CidrGen {
    /// A generator over the given CIDR block. Malformed CIDR text is a
    /// construction-time error.
    pub fn new(cidr: &str) -> Result<Self, String> {
        let net: IpNet = cidr
            .trim()
            .parse()
            .map_err(|e| format!("invalid CIDR '{}': {}", cidr, e))?;
        Ok(Self {
            cursor: full_range(&net),
            net,
        })
    }
}

/// The full address range of a block, network through broadcast.
fn full_range(net: &IpNet) -> IpAddrRange {
    match net {
        IpNet::V4(n) => IpAddrRange::V4(Ipv4AddrRange::new(n.network(), n.broadcast())),
        IpNet::V6(n) => IpAddrRange::V6(Ipv6AddrRange::new(n.network(), n.broadcast())),
    }
}

impl FieldGenerator for CidrGen {
    fn next(&mut self) -> GenValue {
        match self.cursor.next() {
            Some(addr) => GenValue::ip_prefix(addr.to_string()),
            None => GenValue::nil(),
        }
    }

    fn reset(&mut self) {
        // Re-derive from the original block, not the last cursor position
        self.cursor = full_range(&self.net);
    }

    fn cycle_len(&self) -> u64 {
        match &self.net {
            IpNet::V4(n) => 1u64 << (32 - u32::from(n.prefix_len())),
            IpNet::V6(n) => {
                let host_bits = 128 - u32::from(n.prefix_len());
                if host_bits >= 64 {
                    u64::MAX
                } else {
                    1u64 << host_bits
                }
            }
        }
    }
}

// ============================================================================
// Construction from config
// ============================================================================

/// Build a boxed generator from a field declaration.
///
/// All configuration problems surface here or in `validate_config`, before
/// any enumeration begins; a spec that passed validation builds cleanly.
pub fn build_field_generator(
    name: &str,
    spec: &FieldSpec,
) -> Result<Box<dyn FieldGenerator>, String> {
    match spec.generator {
        GeneratorType::Repeat => {
            let payload = spec
                .value
                .clone()
                .ok_or_else(|| format!("field '{}': repeat generator needs a value", name))?;
            let value =
                GenValue::new(spec.kind, payload).map_err(|e| format!("field '{}': {}", name, e))?;
            let gen = RepeatGen::new(value, spec.count)
                .map_err(|e| format!("field '{}': {}", name, e))?;
            Ok(Box::new(gen))
        }
        GeneratorType::Cidr => {
            let subnet = spec
                .subnet
                .as_deref()
                .ok_or_else(|| format!("field '{}': cidr generator needs a subnet", name))?;
            let gen = CidrGen::new(subnet).map_err(|e| format!("field '{}': {}", name, e))?;
            Ok(Box::new(gen))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
