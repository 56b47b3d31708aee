// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Key-space enumeration.
//!
//! A [`KeySpace`] is a finite, indexable set of machine configurations. Index
//! `i` is decoded as a mixed-radix number whose digits are, from most to
//! least significant:
//!
//! ```text
//! plugboard | reflector | rotor order | ring settings | starting positions
//! ```
//!
//! with the rightmost rotor's position varying fastest. Iteration therefore
//! follows lexicographic order over (rotor order, rings, positions) for each
//! plugboard and reflector, and every configuration appears exactly once.
//! The enumerator never reorders: ranking is the search controller's job.
//!
//! # Examples
//!
//! ```
//! use enigma_search::keyspace::KeySpace;
//! use enigma_search::machine::MachineModel;
//!
//! let space = KeySpace::new(MachineModel::EnigmaI);
//! assert_eq!(space.len(), 60 * 26u128.pow(3) * 26u128.pow(3));
//!
//! let first = space.get(0).unwrap();
//! assert_eq!(first.to_string(), "EnigmaI UKW-B I-II-III rings AAA pos AAA");
//! assert_eq!(space.index_of(&first), Some(0));
//! ```

use crate::alphabet::ALPHABET_SIZE;
use crate::catalog::{ReflectorId, RotorId};
use crate::error::{EnigmaError, EnigmaResult};
use crate::machine::{MachineConfig, MachineModel, Plugboard};

const RADIX: u128 = ALPHABET_SIZE as u128;

/// Ring settings covered by a key space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingSettings {
    /// Every combination of ring settings.
    All,
    /// A single known combination.
    Fixed(Vec<u8>),
}

/// A finite, indexable set of configurations for one machine model.
#[derive(Debug, Clone)]
pub struct KeySpace {
    model: MachineModel,
    plugboards: Vec<Plugboard>,
    reflectors: Vec<ReflectorId>,
    /// Explicit rotor orders; `None` means every legal order.
    orders: Option<Vec<Vec<RotorId>>>,
    rings: RingSettings,
    slots: usize,
    order_count: u128,
    ring_count: u128,
    position_count: u128,
}

impl KeySpace {
    /// Every rotor order, ring setting and position, with the model's default
    /// reflector and no plugboard.
    pub fn new(model: MachineModel) -> Self {
        let space = Self::builder(model).build();
        // The defaults always satisfy the builder's checks.
        space.unwrap_or_else(|_| unreachable!("default key space is valid"))
    }

    pub fn builder(model: MachineModel) -> KeySpaceBuilder {
        KeySpaceBuilder {
            model,
            plugboards: vec![Plugboard::empty()],
            reflectors: vec![model.default_reflector()],
            orders: None,
            rings: RingSettings::All,
        }
    }

    pub fn model(&self) -> MachineModel {
        self.model
    }

    /// Number of configurations in the space.
    pub fn len(&self) -> u128 {
        self.plugboards.len() as u128
            * self.reflectors.len() as u128
            * self.order_count
            * self.ring_count
            * self.position_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct rotor orders.
    pub fn rotor_orders(&self) -> u128 {
        self.order_count
    }

    /// The configuration at `index`, or `None` past the end.
    pub fn get(&self, index: u128) -> Option<MachineConfig> {
        if index >= self.len() {
            return None;
        }

        let mut rest = index;
        let positions = decode_digits(rest % self.position_count, self.slots);
        rest /= self.position_count;
        let rings = match &self.rings {
            RingSettings::All => decode_digits(rest % self.ring_count, self.slots),
            RingSettings::Fixed(rings) => rings.clone(),
        };
        rest /= self.ring_count;
        let rotors = self.decode_order(rest % self.order_count);
        rest /= self.order_count;
        let reflector = self.reflectors[(rest % self.reflectors.len() as u128) as usize];
        rest /= self.reflectors.len() as u128;
        let plugboard = self.plugboards[rest as usize].clone();

        Some(MachineConfig {
            model: self.model,
            reflector,
            rotors,
            rings,
            positions,
            plugboard,
        })
    }

    /// Inverse of [`get`](Self::get): where `config` sits in this space.
    pub fn index_of(&self, config: &MachineConfig) -> Option<u128> {
        if config.model != self.model || config.validate().is_err() {
            return None;
        }
        let plugboard = self.plugboards.iter().position(|p| *p == config.plugboard)? as u128;
        let reflector = self.reflectors.iter().position(|&r| r == config.reflector)? as u128;
        let order = self.encode_order(&config.rotors)?;
        let rings = match &self.rings {
            RingSettings::All => encode_digits(&config.rings),
            RingSettings::Fixed(rings) if *rings == config.rings => 0,
            RingSettings::Fixed(_) => return None,
        };
        let positions = encode_digits(&config.positions);

        let index = (((plugboard * self.reflectors.len() as u128 + reflector) * self.order_count
            + order)
            * self.ring_count
            + rings)
            * self.position_count
            + positions;
        Some(index)
    }

    /// Iterate from the first configuration. Each call starts afresh.
    pub fn iter(&self) -> KeySpaceIter<'_> {
        self.iter_from(0)
    }

    /// Iterate starting at `index` (resume a previous enumeration).
    pub fn iter_from(&self, index: u128) -> KeySpaceIter<'_> {
        KeySpaceIter {
            space: self,
            next: index,
        }
    }

    fn thin_choices(&self) -> &'static [RotorId] {
        self.model.thin_rotors()
    }

    /// Decode a rotor-order index: thin rotor (M4 only), then a lexicographic
    /// 3-permutation of the stepping rotors.
    fn decode_order(&self, index: u128) -> Vec<RotorId> {
        if let Some(orders) = &self.orders {
            return orders[index as usize].clone();
        }
        let thin = self.thin_choices();
        let stepping = self.model.stepping_rotors();
        let permutations = permutation_count(stepping.len(), 3);

        let mut rotors = Vec::with_capacity(self.slots);
        let mut rest = index;
        if !thin.is_empty() {
            rotors.push(thin[(rest / permutations) as usize]);
            rest %= permutations;
        }

        let mut available: Vec<RotorId> = stepping.to_vec();
        for slots_left in (1..=3).rev() {
            let radix = permutation_count(available.len() - 1, slots_left - 1);
            let choice = (rest / radix) as usize;
            rest %= radix;
            rotors.push(available.remove(choice));
        }
        rotors
    }

    fn encode_order(&self, rotors: &[RotorId]) -> Option<u128> {
        if let Some(orders) = &self.orders {
            return orders.iter().position(|o| o == rotors).map(|i| i as u128);
        }
        let thin = self.thin_choices();
        let stepping = self.model.stepping_rotors();
        let permutations = permutation_count(stepping.len(), 3);

        let (mut index, rest) = if thin.is_empty() {
            (0, rotors)
        } else {
            let t = thin.iter().position(|r| *r == rotors[0])? as u128;
            (t * permutations, &rotors[1..])
        };

        let mut available: Vec<RotorId> = stepping.to_vec();
        let mut offset = 0;
        for (i, rotor) in rest.iter().enumerate() {
            let slots_left = 3 - i;
            let radix = permutation_count(available.len() - 1, slots_left - 1);
            let choice = available.iter().position(|r| r == rotor)?;
            offset += choice as u128 * radix;
            available.remove(choice);
        }
        index += offset;
        Some(index)
    }
}

/// Builder for key spaces restricted to given reflectors, plugboards or rings.
#[derive(Debug, Clone)]
pub struct KeySpaceBuilder {
    model: MachineModel,
    plugboards: Vec<Plugboard>,
    reflectors: Vec<ReflectorId>,
    orders: Option<Vec<Vec<RotorId>>>,
    rings: RingSettings,
}

impl KeySpaceBuilder {
    pub fn reflectors(mut self, reflectors: Vec<ReflectorId>) -> Self {
        self.reflectors = reflectors;
        self
    }

    /// Every reflector the model accepts.
    pub fn all_reflectors(mut self) -> Self {
        self.reflectors = self.model.reflectors().to_vec();
        self
    }

    /// Externally supplied plugboard candidates.
    pub fn plugboards(mut self, plugboards: Vec<Plugboard>) -> Self {
        self.plugboards = plugboards;
        self
    }

    /// Restrict the search to known wheel orders, left to right.
    pub fn rotor_orders(mut self, orders: Vec<Vec<RotorId>>) -> Self {
        self.orders = Some(orders);
        self
    }

    pub fn fixed_rings(mut self, rings: Vec<u8>) -> Self {
        self.rings = RingSettings::Fixed(rings);
        self
    }

    pub fn build(self) -> EnigmaResult<KeySpace> {
        let slots = self.model.rotor_count();

        if self.reflectors.is_empty() || self.plugboards.is_empty() {
            return Err(EnigmaError::config("key space needs a reflector and a plugboard"));
        }
        for (i, reflector) in self.reflectors.iter().enumerate() {
            if !self.model.reflectors().contains(reflector) {
                return Err(EnigmaError::config(format!(
                    "reflector {} does not fit {}",
                    reflector, self.model
                )));
            }
            if self.reflectors[..i].contains(reflector) {
                return Err(EnigmaError::config(format!("reflector {} listed twice", reflector)));
            }
        }
        for (i, plugboard) in self.plugboards.iter().enumerate() {
            if self.plugboards[..i].contains(plugboard) {
                return Err(EnigmaError::config(format!("plugboard {} listed twice", plugboard)));
            }
        }
        let ring_count = match &self.rings {
            RingSettings::All => RADIX.pow(slots as u32),
            RingSettings::Fixed(rings) => {
                if rings.len() != slots || rings.iter().any(|&r| r as usize >= ALPHABET_SIZE) {
                    return Err(EnigmaError::config(format!(
                        "fixed ring settings {:?} do not fit {}",
                        rings, self.model
                    )));
                }
                1
            }
        };

        let order_count = match &self.orders {
            Some(orders) => {
                if orders.is_empty() {
                    return Err(EnigmaError::config("key space needs a rotor order"));
                }
                for (i, order) in orders.iter().enumerate() {
                    MachineConfig::new(self.model, order.clone()).validate()?;
                    if orders[..i].contains(order) {
                        return Err(EnigmaError::config(format!(
                            "rotor order {:?} listed twice",
                            order
                        )));
                    }
                }
                orders.len() as u128
            }
            None => {
                let stepping = permutation_count(self.model.stepping_rotors().len(), 3);
                stepping * (self.model.thin_rotors().len().max(1) as u128)
            }
        };

        Ok(KeySpace {
            model: self.model,
            plugboards: self.plugboards,
            reflectors: self.reflectors,
            orders: self.orders,
            rings: self.rings,
            slots,
            order_count,
            ring_count,
            position_count: RADIX.pow(slots as u32),
        })
    }
}

/// Lazy iterator over a key space.
#[derive(Debug, Clone)]
pub struct KeySpaceIter<'a> {
    space: &'a KeySpace,
    next: u128,
}

impl KeySpaceIter<'_> {
    /// Index of the next configuration this iterator will yield.
    pub fn position(&self) -> u128 {
        self.next
    }
}

impl Iterator for KeySpaceIter<'_> {
    type Item = MachineConfig;

    fn next(&mut self) -> Option<Self::Item> {
        let config = self.space.get(self.next)?;
        self.next += 1;
        Some(config)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.space.len().saturating_sub(self.next);
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Number of ordered selections of `k` items from `n` (n!/(n-k)!).
fn permutation_count(n: usize, k: usize) -> u128 {
    ((n - k + 1)..=n).map(|x| x as u128).product()
}

/// Base-26 digits, most significant first.
fn decode_digits(mut value: u128, width: usize) -> Vec<u8> {
    let mut digits = vec![0u8; width];
    for slot in digits.iter_mut().rev() {
        *slot = (value % RADIX) as u8;
        value /= RADIX;
    }
    digits
}

fn encode_digits(digits: &[u8]) -> u128 {
    digits.iter().fold(0, |acc, &d| acc * RADIX + d as u128)
}
