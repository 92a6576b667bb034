//! Unit conversions between the mixed aviation units used throughout the
//! simulation: positions in km, speeds in kt, altitudes in ft.

pub const KM_PER_NM: f64 = 1.852;
pub const FT_PER_KM: f64 = 3280.84;
pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Kilometers to nautical miles
#[inline]
pub fn km_to_nm(km: f64) -> f64 {
    km / KM_PER_NM
}

/// Nautical miles to kilometers
#[inline]
pub fn nm_to_km(nm: f64) -> f64 {
    nm * KM_PER_NM
}

/// Knots to kilometers per second
#[inline]
pub fn knots_to_kps(knots: f64) -> f64 {
    knots * KM_PER_NM / SECONDS_PER_HOUR
}

/// Feet to kilometers
#[inline]
pub fn ft_to_km(ft: f64) -> f64 {
    ft / FT_PER_KM
}

/// Kilometers to feet
#[inline]
pub fn km_to_ft(km: f64) -> f64 {
    km * FT_PER_KM
}
