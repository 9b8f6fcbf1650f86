//! Attacker actions.
//!
//! An action targets one machine with a `kind`: 0 is a scan, `k > 0` is an
//! exploit of service `k - 1`.

use std::fmt;

use rand::Rng;

use crate::error::EnvError;
use crate::network::{Address, AddressSpace};
use crate::space::Space;

/// Action kind for a scan
pub const SCAN: usize = 0;

/// Cost of scanning a machine
pub const COST_SCAN: f64 = 10.0;
/// Cost of attempting an exploit
pub const COST_EXPLOIT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub target: Address,
    pub kind: usize,
}

impl Action {
    pub fn new(target: Address, kind: usize) -> Self {
        Self { target, kind }
    }

    pub fn scan(target: Address) -> Self {
        Self { target, kind: SCAN }
    }

    /// Exploit the service at index `service`
    pub fn exploit(target: Address, service: usize) -> Self {
        Self {
            target,
            kind: service + 1,
        }
    }

    pub fn is_scan(&self) -> bool {
        self.kind == SCAN
    }

    /// Index of the exploited service, `None` for scans
    pub fn service(&self) -> Option<usize> {
        self.kind.checked_sub(1)
    }

    pub fn cost(&self) -> f64 {
        if self.is_scan() {
            COST_SCAN
        } else {
            COST_EXPLOIT
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.service() {
            None => write!(f, "scan {}", self.target),
            Some(service) => write!(f, "exploit {} service {}", self.target, service),
        }
    }
}

/// Every action available on a network
#[derive(Debug, Clone)]
pub struct ActionSpace {
    address_space: AddressSpace,
    services: usize,
}

impl ActionSpace {
    pub fn new(address_space: AddressSpace, services: usize) -> Self {
        Self {
            address_space,
            services,
        }
    }

    pub fn address_space(&self) -> &AddressSpace {
        &self.address_space
    }

    /// Number of distinct action kinds (scan plus one exploit per service)
    pub fn kinds(&self) -> usize {
        self.services + 1
    }

    /// Check an action against the network, reporting the first problem
    pub fn validate(&self, action: &Action) -> Result<(), EnvError> {
        if !self.address_space.contains(&action.target) {
            return Err(EnvError::InvalidTarget {
                target: action.target,
            });
        }
        if action.kind > self.services {
            return Err(EnvError::InvalidActionKind {
                kind: action.kind,
                max: self.services,
            });
        }
        Ok(())
    }
}

impl Space for ActionSpace {
    type Element = Action;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Action {
        let target = self.address_space.sample(rng);
        Action::new(target, rng.gen_range(0..self.kinds()))
    }

    fn contains(&self, x: &Action) -> bool {
        self.validate(x).is_ok()
    }
}
