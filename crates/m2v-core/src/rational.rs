//! 有理数.
//!
//! 帧率 (如 30000/1001)、宽高比 (如 16/9) 与时间基都用它表示.

use std::fmt;
use std::ops::Mul;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    /// 分母为 0, 表示未知
    pub const UNDEFINED: Self = Self { num: 0, den: 0 };

    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    pub const fn is_valid(&self) -> bool {
        self.den != 0
    }

    /// 未知值返回 NaN
    pub fn to_f64(self) -> f64 {
        if self.is_valid() {
            f64::from(self.num) / f64::from(self.den)
        } else {
            f64::NAN
        }
    }

    /// 约分, 分母保持为正
    pub fn reduce(self) -> Self {
        reduced(i64::from(self.num), i64::from(self.den))
    }
}

/// 在 i64 上约分后收窄回 i32
fn reduced(num: i64, den: i64) -> Rational {
    if den == 0 {
        return Rational::new(num as i32, 0);
    }
    let g = gcd(num.unsigned_abs(), den.unsigned_abs()).max(1) as i64;
    let sign = den.signum();
    Rational::new((sign * num / g) as i32, (sign * den / g) as i32)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        reduced(
            i64::from(self.num) * i64::from(rhs.num),
            i64::from(self.den) * i64::from(rhs.den),
        )
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}
