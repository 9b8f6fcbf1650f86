//! Machine addressing.
//!
//! An address is a `(subnet, id)` pair where `id` is the machine's index
//! within its subnet. The address set for a given machine count is fixed by
//! a deterministic assignment rule:
//!
//! - machine 0 is the single exposed machine `(0, 0)`
//! - every 10th machine starting from machine 1 goes to the sensitive subnet
//! - all remaining machines go to the user subnet

use std::fmt;

use rand::Rng;

use crate::error::EnvError;
use crate::space::Space;

/// Network segment a machine lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subnet {
    /// Entry point, reachable from the start
    Exposed,
    /// Holds the high value documents
    Sensitive,
    /// Ordinary user machines
    User,
}

impl Subnet {
    /// All subnets in address order
    pub const ALL: [Subnet; 3] = [Subnet::Exposed, Subnet::Sensitive, Subnet::User];

    /// Numeric subnet identifier (0, 1 or 2)
    pub fn index(&self) -> usize {
        match self {
            Subnet::Exposed => 0,
            Subnet::Sensitive => 1,
            Subnet::User => 2,
        }
    }

    /// Subnet for a numeric identifier, if one exists
    pub fn from_index(index: usize) -> Option<Subnet> {
        Subnet::ALL.get(index).copied()
    }
}

/// Address of a machine on the simulated network
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    pub subnet: Subnet,
    pub id: usize,
}

impl Address {
    pub const fn new(subnet: Subnet, id: usize) -> Self {
        Self { subnet, id }
    }

    /// Build an address from raw `(subnet, id)` integers
    pub fn from_parts(subnet: usize, id: usize) -> Option<Self> {
        Subnet::from_index(subnet).map(|subnet| Self { subnet, id })
    }

    /// Returns true if this machine holds sensitive documents.
    ///
    /// Used both for the value of a machine in the ground truth network and
    /// for the `sensitive` flag of the observation.
    pub fn is_sensitive(&self) -> bool {
        self.subnet != Subnet::Exposed && self.id % 10 == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.subnet.index(), self.id)
    }
}

/// Generate the sorted address list for a network of `machines` machines.
///
/// # Arguments
/// * `machines` - Total number of machines, must be greater than 2
///
/// # Returns
/// * `Ok(Vec<Address>)` - Addresses sorted by `(subnet, id)`
/// * `Err(EnvError::TooFewMachines)` - If `machines <= 2`
///
/// # Examples
/// ```
/// use cyberattack::network::{generate_address_space, Address, Subnet};
///
/// let addresses = generate_address_space(4).unwrap();
/// assert_eq!(addresses, vec![
///     Address::new(Subnet::Exposed, 0),
///     Address::new(Subnet::Sensitive, 0),
///     Address::new(Subnet::User, 0),
///     Address::new(Subnet::User, 1),
/// ]);
/// ```
pub fn generate_address_space(machines: usize) -> Result<Vec<Address>, EnvError> {
    // need the exposed machine plus at least one in each other subnet
    if machines <= 2 {
        return Err(EnvError::TooFewMachines { machines });
    }

    let mut addresses = Vec::with_capacity(machines);
    let mut sensitive_id = 0;
    let mut user_id = 0;
    for m in 0..machines {
        if m == 0 {
            addresses.push(Address::new(Subnet::Exposed, 0));
        } else if m % 10 == 1 {
            addresses.push(Address::new(Subnet::Sensitive, sensitive_id));
            sensitive_id += 1;
        } else {
            addresses.push(Address::new(Subnet::User, user_id));
            user_id += 1;
        }
    }
    addresses.sort();
    Ok(addresses)
}

/// The fixed set of machine addresses for a network
#[derive(Debug, Clone, PartialEq)]
pub struct AddressSpace {
    addresses: Vec<Address>,
}

impl AddressSpace {
    pub fn new(machines: usize) -> Result<Self, EnvError> {
        Ok(Self {
            addresses: generate_address_space(machines)?,
        })
    }

    /// Addresses in sorted order
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Number of machines on the given subnet
    pub fn subnet_size(&self, subnet: Subnet) -> usize {
        self.addresses.iter().filter(|a| a.subnet == subnet).count()
    }
}

impl Space for AddressSpace {
    type Element = Address;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Address {
        self.addresses[rng.gen_range(0..self.addresses.len())]
    }

    fn contains(&self, x: &Address) -> bool {
        self.addresses.binary_search(x).is_ok()
    }
}
