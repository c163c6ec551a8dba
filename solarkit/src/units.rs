//! Lightweight unit newtypes for the handful of quantities the simulation
//! cares about. A full-blown units library is overkill here.
#![allow(dead_code)]

use std::f64::consts::TAU;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::Serialize;

/// Astronomical-unit based length.
#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Length {
    au: f64,
}

impl std::fmt::Debug for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} au", self.au)
    }
}

/// Meters per astronomical unit (IAU 2012 definition).
pub const METERS_PER_AU: f64 = 1.495_978_707e11;

impl Length {
    pub const fn from_au(au: f64) -> Length {
        Length { au }
    }

    pub fn from_meters(meters: f64) -> Length {
        Length {
            au: meters / METERS_PER_AU,
        }
    }

    pub fn as_au(&self) -> f64 {
        self.au
    }

    pub fn as_meters(&self) -> f64 {
        self.au * METERS_PER_AU
    }

    pub fn abs(&self) -> Length {
        Length { au: self.au.abs() }
    }
}

impl Add<Length> for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Self::Output {
        Length::from_au(self.as_au() + rhs.as_au())
    }
}

impl Sub<Length> for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Self::Output {
        Length::from_au(self.as_au() - rhs.as_au())
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Self::Output {
        Length::from_au(self.as_au() * rhs)
    }
}

impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Self::Output {
        Length::from_au(self * rhs.as_au())
    }
}

/// Simulation time, stored in days.
#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Time {
    days: f64,
}

impl std::fmt::Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} d", self.days)
    }
}

/// Days per Julian year.
pub const DAYS_PER_YEAR: f64 = 365.25;

impl Time {
    pub const fn from_days(days: f64) -> Time {
        Time { days }
    }

    pub fn from_years(years: f64) -> Time {
        Time {
            days: years * DAYS_PER_YEAR,
        }
    }

    pub fn from_secs(seconds: f64) -> Time {
        Time {
            days: seconds / 86_400.0,
        }
    }

    pub const fn zero() -> Time {
        Time { days: 0.0 }
    }

    pub fn as_days(&self) -> f64 {
        self.days
    }

    pub fn as_years(&self) -> f64 {
        self.days / DAYS_PER_YEAR
    }

    pub fn as_secs(&self) -> f64 {
        self.days * 86_400.0
    }

    pub fn abs(&self) -> Time {
        Time {
            days: self.days.abs(),
        }
    }
}

impl Add<Time> for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Self::Output {
        Time::from_days(self.as_days() + rhs.as_days())
    }
}

impl AddAssign<Time> for Time {
    fn add_assign(&mut self, rhs: Time) {
        self.days += rhs.as_days();
    }
}

impl Sub<Time> for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Self::Output {
        Time::from_days(self.as_days() - rhs.as_days())
    }
}

impl SubAssign<Time> for Time {
    fn sub_assign(&mut self, rhs: Time) {
        self.days -= rhs.as_days();
    }
}

impl Neg for Time {
    type Output = Time;

    fn neg(self) -> Self::Output {
        Time::from_days(-self.as_days())
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Self::Output {
        Time::from_days(self.as_days() * rhs)
    }
}

impl Div<f64> for Time {
    type Output = Time;

    fn div(self, rhs: f64) -> Self::Output {
        Time::from_days(self.as_days() / rhs)
    }
}

impl Div<usize> for Time {
    type Output = Time;

    fn div(self, rhs: usize) -> Self::Output {
        Time::from_days(self.as_days() / (rhs as f64))
    }
}

impl Div<Time> for Time {
    type Output = f64;

    fn div(self, rhs: Time) -> Self::Output {
        self.as_days() / rhs.as_days()
    }
}

/// Plane angle, stored in radians.
#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Angle {
    radians: f64,
}

impl std::fmt::Debug for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rad", self.radians)
    }
}

impl Angle {
    pub const fn from_radians(radians: f64) -> Angle {
        Angle { radians }
    }

    pub fn from_degrees(degrees: f64) -> Angle {
        Angle {
            radians: degrees.to_radians(),
        }
    }

    pub const fn zero() -> Angle {
        Angle { radians: 0.0 }
    }

    pub fn as_radians(&self) -> f64 {
        self.radians
    }

    pub fn as_degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    /// Wrapped into [0, 2π).
    pub fn normalized(&self) -> Angle {
        let mut r = self.radians % TAU;
        if r < 0.0 {
            r += TAU;
        }
        Angle { radians: r }
    }

    pub fn sin(&self) -> f64 {
        self.radians.sin()
    }

    pub fn cos(&self) -> f64 {
        self.radians.cos()
    }
}

impl Add<Angle> for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Self::Output {
        Angle::from_radians(self.as_radians() + rhs.as_radians())
    }
}

impl Sub<Angle> for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Self::Output {
        Angle::from_radians(self.as_radians() - rhs.as_radians())
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Self::Output {
        Angle::from_radians(self.as_radians() * rhs)
    }
}

/// Angular rate, stored in radians per day.
#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct AngularVelocity {
    radians_per_day: f64,
}

impl std::fmt::Debug for AngularVelocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rad·d⁻¹", self.radians_per_day)
    }
}

impl AngularVelocity {
    pub const fn from_radians_per_day(radians_per_day: f64) -> AngularVelocity {
        AngularVelocity { radians_per_day }
    }

    pub fn as_radians_per_day(&self) -> f64 {
        self.radians_per_day
    }
}

impl Mul<Time> for AngularVelocity {
    type Output = Angle;

    fn mul(self, rhs: Time) -> Self::Output {
        Angle::from_radians(self.as_radians_per_day() * rhs.as_days())
    }
}

/// Body mass, stored in Earth masses.
#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Mass {
    earth_masses: f64,
}

impl std::fmt::Debug for Mass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} M⊕", self.earth_masses)
    }
}

impl Mass {
    pub const fn from_earth_masses(earth_masses: f64) -> Mass {
        Mass { earth_masses }
    }

    pub fn as_earth_masses(&self) -> f64 {
        self.earth_masses
    }
}
