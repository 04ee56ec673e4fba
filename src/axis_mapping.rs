//! # Axis letters and the joint mapping
//!
//! A machine configuration names its joints with an ordered string of axis
//! letters drawn from the nine-symbol alphabet `XYZABCUVW`. Letters map to
//! joint numbers sequentially, and a letter may repeat to drive several
//! joints from one axis (gantry-style machines).
//!
//! Example coordinates-to-joints mappings:
//!
//! ```text
//! coordinates=XYZ      X:0   Y:1   Z:2
//! coordinates=ZYX      Z:0   Y:1   X:2
//! coordinates=XYZZZZ   X:0   Y:1   Z:2,3,4,5
//! coordinates=XXYZ     X:0,1 Y:2   Z:3
//! ```
//!
//! The first joint listed for a letter is that axis's **principal joint**;
//! the calibrated transform reads the X/Y/Z principal joints and every
//! duplicate joint follows its axis's value on the inverse path. The mapping
//! is parsed once at machine startup and is immutable afterwards; any
//! rejected string must abort initialization.

use std::fmt;

use crate::calikins_errors::CalikinsError;
use crate::constants::{MAX_AXES, MAX_COORDINATE_CHARS, MAX_JOINTS};

/// One machine axis letter.
///
/// `X`, `Y`, `Z` are the calibrated linear axes; the remaining six are
/// auxiliary axes passed through the kinematics uncorrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
    A,
    B,
    C,
    U,
    V,
    W,
}

impl Axis {
    pub const ALL: [Axis; MAX_AXES] = [
        Axis::X,
        Axis::Y,
        Axis::Z,
        Axis::A,
        Axis::B,
        Axis::C,
        Axis::U,
        Axis::V,
        Axis::W,
    ];

    /// Total mapping from the axis alphabet, case-insensitive. Returns
    /// `None` for any symbol outside `XYZABCUVW`.
    pub fn from_letter(letter: char) -> Option<Axis> {
        match letter.to_ascii_uppercase() {
            'X' => Some(Axis::X),
            'Y' => Some(Axis::Y),
            'Z' => Some(Axis::Z),
            'A' => Some(Axis::A),
            'B' => Some(Axis::B),
            'C' => Some(Axis::C),
            'U' => Some(Axis::U),
            'V' => Some(Axis::V),
            'W' => Some(Axis::W),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::A => 'A',
            Axis::B => 'B',
            Axis::C => 'C',
            Axis::U => 'U',
            Axis::V => 'V',
            Axis::W => 'W',
        }
    }

    /// True for the three calibrated linear axes.
    pub fn is_linear(self) -> bool {
        matches!(self, Axis::X | Axis::Y | Axis::Z)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Immutable assignment of axis letters to joint numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisJointMapping {
    axis_for_joint: [Option<Axis>; MAX_JOINTS],
    first_joint_for_axis: [Option<usize>; MAX_AXES],
    linear_joints: [usize; 3],
    joint_count: usize,
}

impl AxisJointMapping {
    /// Mapping used when the operator does not specify coordinates:
    /// `X:0 Y:1 Z:2 A:3 B:4 C:5 U:6 V:7 W:8`.
    pub const DEFAULT_COORDINATES: &'static str = "XYZABCUVW";

    /// Parse a coordinates string into a joint mapping.
    ///
    /// Whitespace between letters is ignored. `max_joints` caps how many
    /// joints the machine provides; `allow_duplicates` permits one letter to
    /// drive several joints. The string must assign all of X, Y, and Z or
    /// the kinematics cannot run.
    ///
    /// Return
    /// ----------
    /// * The immutable mapping, or a fatal [`CalikinsError`] describing why
    ///   initialization must refuse to proceed.
    pub fn new(
        coordinates: &str,
        max_joints: usize,
        allow_duplicates: bool,
    ) -> Result<Self, CalikinsError> {
        if coordinates.len() > MAX_COORDINATE_CHARS {
            return Err(CalikinsError::CoordinatesTooLong(
                coordinates.to_string(),
                MAX_COORDINATE_CHARS,
            ));
        }
        if max_joints == 0 || max_joints > MAX_JOINTS {
            return Err(CalikinsError::InvalidJointLimit(max_joints, MAX_JOINTS));
        }

        let mut axis_for_joint = [None; MAX_JOINTS];
        let mut duplicates = [0usize; MAX_AXES];
        let mut joint_count = 0;

        for letter in coordinates.chars() {
            if letter.is_whitespace() {
                continue;
            }

            let axis = Axis::from_letter(letter).ok_or_else(|| {
                CalikinsError::InvalidAxisLetter(letter, coordinates.to_string())
            })?;

            if joint_count >= max_joints {
                return Err(CalikinsError::TooManyCoordinates(
                    coordinates.to_string(),
                    max_joints,
                ));
            }

            axis_for_joint[joint_count] = Some(axis);
            duplicates[axis.index()] += 1;
            joint_count += 1;
        }

        if joint_count == 0 {
            return Err(CalikinsError::EmptyCoordinates(coordinates.to_string()));
        }

        if !allow_duplicates {
            for axis in Axis::ALL {
                if duplicates[axis.index()] > 1 {
                    return Err(CalikinsError::DuplicateAxisLetter(
                        axis.letter(),
                        coordinates.to_string(),
                    ));
                }
            }
        }

        let mut first_joint_for_axis = [None; MAX_AXES];
        for (joint, axis) in axis_for_joint.iter().take(joint_count).enumerate() {
            if let Some(axis) = axis {
                if first_joint_for_axis[axis.index()].is_none() {
                    first_joint_for_axis[axis.index()] = Some(joint);
                }
            }
        }

        let linear_joints = match (
            first_joint_for_axis[Axis::X.index()],
            first_joint_for_axis[Axis::Y.index()],
            first_joint_for_axis[Axis::Z.index()],
        ) {
            (Some(jx), Some(jy), Some(jz)) => [jx, jy, jz],
            _ => {
                return Err(CalikinsError::MissingLinearAxis(coordinates.to_string()));
            }
        };

        Ok(AxisJointMapping {
            axis_for_joint,
            first_joint_for_axis,
            linear_joints,
            joint_count,
        })
    }

    /// Number of joints the coordinates string assigns.
    pub fn joint_count(&self) -> usize {
        self.joint_count
    }

    /// Axis driven by joint number `joint`, or `None` past the last joint.
    pub fn axis_for_joint(&self, joint: usize) -> Option<Axis> {
        self.axis_for_joint.get(joint).copied().flatten()
    }

    /// Principal joint of `axis`: the first joint slot its letter was
    /// assigned to, or `None` when the letter never appears.
    pub fn first_joint_for_axis(&self, axis: Axis) -> Option<usize> {
        self.first_joint_for_axis[axis.index()]
    }

    /// Principal joints of X, Y, Z, in that order. Guaranteed present by
    /// construction.
    pub fn linear_joints(&self) -> [usize; 3] {
        self.linear_joints
    }
}
