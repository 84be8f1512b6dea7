//! Pre-configured device specifications
//!
//! Common phase-only SLM templates. Values follow the vendors' datasheets for
//! the base model; check the serial-specific sheet of your unit for the exact
//! wavelength coating.

pub mod generic;
pub mod hamamatsu;
pub mod holoeye;
pub mod meadowlark;
pub mod thorlabs;

pub use generic::*;
pub use hamamatsu::*;
pub use holoeye::*;
pub use meadowlark::*;
pub use thorlabs::*;

use crate::SlmSpec;

/// Every device template shipped with this crate
pub const ALL_DEVICES: &[&SlmSpec] = &[
    &HOLOEYE_PLUTO_2_1_UV,
    &HOLOEYE_PLUTO_2_1_NIR,
    &HOLOEYE_LETO_3,
    &HOLOEYE_GAEA_2,
    &THORLABS_EXULUS_HD1,
    &THORLABS_EXULUS_HD2,
    &MEADOWLARK_E_SERIES_1920,
    &HAMAMATSU_X13138,
    &GENERIC_1080P,
    &GENERIC_XGA,
];

/// Look up a device template by its short id (case-insensitive)
pub fn find_device(id: &str) -> Option<&'static SlmSpec> {
    ALL_DEVICES
        .iter()
        .copied()
        .find(|spec| spec.id.eq_ignore_ascii_case(id))
}
