//! 8x8 整数反 DCT.
//!
//! 行变换使用四组固定余弦系数表做乘累加, 右移 11 位并饱和到 16 位;
//! 列变换使用正切/余弦半角分解的蝶形结构, 全部采用 16 位饱和运算, 最后右移 6 位.
//! 结果与 SSE2 定点实现逐位一致.

// ============================================================================
// 行变换系数表
// ============================================================================

/// 行 0 与行 4 的系数
const TAB_I_04: [i32; 32] = [
    16384, 21407, 16384, 8867, 16384, -8867, 16384, -21407, //
    16384, 8867, -16384, -21407, -16384, 21407, 16384, -8867, //
    22725, 19266, 19266, -4520, 12873, -22725, 4520, -12873, //
    12873, 4520, -22725, -12873, 4520, 19266, 19266, -22725,
];

/// 行 1 与行 7 的系数
const TAB_I_17: [i32; 32] = [
    22725, 29692, 22725, 12299, 22725, -12299, 22725, -29692, //
    22725, 12299, -22725, -29692, -22725, 29692, 22725, -12299, //
    31521, 26722, 26722, -6270, 17855, -31521, 6270, -17855, //
    17855, 6270, -31521, -17855, 6270, 26722, 26722, -31521,
];

/// 行 2 与行 6 的系数
const TAB_I_26: [i32; 32] = [
    21407, 27969, 21407, 11585, 21407, -11585, 21407, -27969, //
    21407, 11585, -21407, -27969, -21407, 27969, 21407, -11585, //
    29692, 25172, 25172, -5906, 16819, -29692, 5906, -16819, //
    16819, 5906, -29692, -16819, 5906, 25172, 25172, -29692,
];

/// 行 3 与行 5 的系数
const TAB_I_35: [i32; 32] = [
    19266, 25172, 19266, 10426, 19266, -10426, 19266, -25172, //
    19266, 10426, -19266, -25172, -19266, 25172, 19266, -10426, //
    26722, 22654, 22654, -5315, 15137, -26722, 5315, -15137, //
    15137, 5315, -26722, -15137, 5315, 22654, 22654, -26722,
];

const ROW_TABLES: [&[i32; 32]; 8] = [
    &TAB_I_04, &TAB_I_17, &TAB_I_26, &TAB_I_35, &TAB_I_04, &TAB_I_35, &TAB_I_26, &TAB_I_17,
];

/// 行变换舍入常量
const ROW_ROUNDING: i32 = 1 << 10;

// 列变换常量 (Q16)
const TAN1: i16 = 13036;
const TAN2: i16 = 27146;
const TAN3: i16 = -21746;
const COS4: i16 = -19195;

#[inline]
fn sat16(v: i32) -> i16 {
    v.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// 16 位有符号乘法取高 16 位
#[inline]
fn mulhi(a: i16, b: i16) -> i16 {
    ((i32::from(a) * i32::from(b)) >> 16) as i16
}

#[inline]
fn adds(a: i16, b: i16) -> i16 {
    a.saturating_add(b)
}

#[inline]
fn subs(a: i16, b: i16) -> i16 {
    a.saturating_sub(b)
}

fn idct_row(row: &mut [i16], t: &[i32; 32]) {
    let x: [i32; 8] = std::array::from_fn(|i| i32::from(row[i]));
    let mut out = [0i16; 8];
    for k in 0..4 {
        let a0 = x[0]
            .wrapping_mul(t[2 * k])
            .wrapping_add(x[2].wrapping_mul(t[2 * k + 1]));
        let a1 = x[1]
            .wrapping_mul(t[16 + 2 * k])
            .wrapping_add(x[3].wrapping_mul(t[17 + 2 * k]));
        let a2 = x[4]
            .wrapping_mul(t[8 + 2 * k])
            .wrapping_add(x[6].wrapping_mul(t[9 + 2 * k]));
        let a3 = x[5]
            .wrapping_mul(t[24 + 2 * k])
            .wrapping_add(x[7].wrapping_mul(t[25 + 2 * k]));
        let s0 = a0.wrapping_add(ROW_ROUNDING).wrapping_add(a2);
        let s1 = a1.wrapping_add(a3);
        out[k] = sat16(s0.wrapping_add(s1) >> 11);
        out[7 - k] = sat16(s0.wrapping_sub(s1) >> 11);
    }
    row.copy_from_slice(&out);
}

fn idct_column(block: &mut [i16; 64], c: usize) {
    let x: [i16; 8] = std::array::from_fn(|r| block[r * 8 + c]);

    let tp765 = adds(mulhi(x[7], TAN1), x[1]);
    let tp465 = subs(mulhi(x[1], TAN1), x[7]);
    let tm765 = adds(mulhi(x[5], TAN3), adds(x[5], x[3]));
    let tm465 = subs(x[5], adds(mulhi(x[3], TAN3), x[3]));

    let t7 = adds(adds(tp765, tm765), 1);
    let tp65 = subs(tp765, tm765);
    let t4 = adds(tp465, tm465);
    let tm65 = adds(subs(tp465, tm465), 1);

    let tmp1 = adds(tp65, tm65);
    let t6 = adds(mulhi(tmp1, COS4), tmp1) | 1;
    let tmp2 = subs(tp65, tm65);
    let t5 = adds(mulhi(tmp2, COS4), tmp2) | 1;

    let tp03 = adds(x[0], x[4]);
    let tp12 = subs(x[0], x[4]);
    let tm03 = adds(mulhi(x[6], TAN2), x[2]);
    let tm12 = subs(mulhi(x[2], TAN2), x[6]);

    let t0 = adds(adds(tp03, tm03), 32);
    let t3 = adds(subs(tp03, tm03), 31);
    let t1 = adds(adds(tp12, tm12), 32);
    let t2 = adds(subs(tp12, tm12), 31);

    let out = [
        adds(t0, t7) >> 6,
        adds(t1, t6) >> 6,
        adds(t2, t5) >> 6,
        adds(t3, t4) >> 6,
        subs(t3, t4) >> 6,
        subs(t2, t5) >> 6,
        subs(t1, t6) >> 6,
        subs(t0, t7) >> 6,
    ];
    for (r, v) in out.into_iter().enumerate() {
        block[r * 8 + c] = v;
    }
}

/// 原地 8x8 反 DCT (光栅顺序)
pub fn idct_8x8(block: &mut [i16; 64]) {
    for (r, row) in block.chunks_exact_mut(8).enumerate() {
        idct_row(row, ROW_TABLES[r]);
    }
    for c in 0..8 {
        idct_column(block, c);
    }
}
