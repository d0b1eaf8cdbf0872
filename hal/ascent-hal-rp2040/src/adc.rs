//! Battery voltage sensing
//!
//! On the Pico, VSYS reaches ADC3 (GPIO29) through a 3:1 divider. The ADC
//! is 12 bit against a 3.3 V reference.

/// ADC full scale
pub const ADC_MAX: u32 = 4096;

/// ADC reference in millivolts
pub const ADC_REF_MV: u32 = 3300;

/// VSYS divider ratio
pub const VSYS_DIVIDER: u32 = 3;

/// GPIO carrying VSYS / 3
pub const VSYS_SENSE_GPIO: u8 = 29;

/// Convert a raw ADC3 sample to VSYS millivolts
pub fn vsys_millivolts(raw: u16) -> u16 {
    let mv = raw as u32 * ADC_REF_MV * VSYS_DIVIDER / ADC_MAX;
    mv.min(u16::MAX as u32) as u16
}
