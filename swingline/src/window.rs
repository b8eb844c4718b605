//! 枢轴窗口判定。
//!
//! 左侧严格比较、右侧非严格比较：并列极值时最早的 bar 胜出。
//! 左侧越界的 bar 直接跳过；右侧窗口不完整时一律判否。
//! `strength` 至少为 1；为 0 时没有窗口可比，三个判定都返回 false。

use rust_decimal::Decimal;

use crate::bar::PriceBar;

pub fn is_swing_high(bars: &[PriceBar], pivot: usize, strength: usize) -> bool {
    if strength == 0 {
        return false;
    }
    let Some(center) = bars.get(pivot) else {
        return false;
    };
    let pivot_high = center.high_price;

    let left_start = pivot.saturating_sub(strength);
    if bars[left_start..pivot]
        .iter()
        .any(|bar| bar.high_price >= pivot_high)
    {
        return false;
    }

    right_window(bars, pivot, strength)
        .is_some_and(|right| right.iter().all(|bar| bar.high_price <= pivot_high))
}

pub fn is_swing_low(bars: &[PriceBar], pivot: usize, strength: usize) -> bool {
    if strength == 0 {
        return false;
    }
    let Some(center) = bars.get(pivot) else {
        return false;
    };
    let pivot_low = center.low_price;

    let left_start = pivot.saturating_sub(strength);
    if bars[left_start..pivot]
        .iter()
        .any(|bar| bar.low_price <= pivot_low)
    {
        return false;
    }

    right_window(bars, pivot, strength)
        .is_some_and(|right| right.iter().all(|bar| bar.low_price >= pivot_low))
}

/// 窗口 `[pivot-strength, pivot+strength]` 内所有存在的 bar 高低点完全一致。
pub fn is_flat_window(bars: &[PriceBar], pivot: usize, strength: usize) -> bool {
    if strength == 0 {
        return false;
    }
    let Some(center) = bars.get(pivot) else {
        return false;
    };
    let (high, low): (Decimal, Decimal) = (center.high_price, center.low_price);

    let start = pivot.saturating_sub(strength);
    let end = pivot.saturating_add(strength).min(bars.len() - 1);
    bars[start..=end]
        .iter()
        .all(|bar| bar.high_price == high && bar.low_price == low)
}

fn right_window(bars: &[PriceBar], pivot: usize, strength: usize) -> Option<&[PriceBar]> {
    let end = pivot.checked_add(strength)?;
    if end >= bars.len() {
        return None;
    }
    Some(&bars[pivot + 1..=end])
}
