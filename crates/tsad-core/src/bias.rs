// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::fmt;

/// Shape of the per-position weight inside an anomaly range.
///
/// Parsing never fails: unrecognized names fall back to [`BiasType::Flat`].
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BiasType {
    /// Every position weighs 1.
    #[default]
    Flat,
    /// Earliest position heaviest.
    Front,
    /// Latest position heaviest.
    Back,
    /// Center heaviest, both ends weigh 1.
    Middle,
}

impl BiasType {
    pub const ALL: [BiasType; 4] = [Self::Flat, Self::Front, Self::Back, Self::Middle];

    /// Resolves a bias name, case-insensitively, falling back to `Flat`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "front" => Self::Front,
            "back" => Self::Back,
            "middle" => Self::Middle,
            _ => Self::Flat,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Front => "front",
            Self::Back => "back",
            Self::Middle => "middle",
        }
    }

    /// Weight of the 1-based `index` within a range of `total_length` positions.
    pub fn weight(self, index: usize, total_length: usize) -> u64 {
        positional_bias(index, total_length, self)
    }
}

impl From<&str> for BiasType {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for BiasType {
    fn from(name: String) -> Self {
        Self::from_name(name.as_str())
    }
}

impl From<BiasType> for String {
    fn from(bias: BiasType) -> Self {
        bias.as_str().to_string()
    }
}

impl fmt::Display for BiasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positional weight of the 1-based `index` in a range of `total_length`.
///
/// `index` outside `1..=total_length` is a precondition violation; the
/// result saturates instead of panicking.
pub fn positional_bias(index: usize, total_length: usize, bias: BiasType) -> u64 {
    let from_front = (total_length + 1).saturating_sub(index);
    let weight = match bias {
        BiasType::Flat => 1,
        BiasType::Front => from_front,
        BiasType::Back => index,
        BiasType::Middle => index.min(from_front),
    };
    weight as u64
}

/// Total weight of the 1-based positions `first..=last` in a range of
/// `total_length`, in closed form.
///
/// Positions outside `1..=total_length` are clipped; an empty span sums to 0.
pub fn positional_bias_sum(
    first: usize,
    last: usize,
    total_length: usize,
    bias: BiasType,
) -> u128 {
    let first = first.max(1) as u128;
    let last = last.min(total_length) as u128;
    let total = total_length as u128;

    let ascending = |low: u128, high: u128| {
        if low > high {
            0
        } else {
            (low + high) * (high - low + 1) / 2
        }
    };
    let descending = |low: u128, high: u128| {
        if low > high {
            0
        } else {
            (high - low + 1) * (total + 1) - ascending(low, high)
        }
    };

    match bias {
        _ if first > last => 0,
        BiasType::Flat => last - first + 1,
        BiasType::Back => ascending(first, last),
        BiasType::Front => descending(first, last),
        BiasType::Middle => {
            let peak = (total + 1) / 2;
            ascending(first, last.min(peak)) + descending(first.max(peak + 1), last)
        }
    }
}
