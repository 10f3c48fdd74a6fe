//! Long-short spreads and factor portfolios from sorted returns.

use hobart_data::schema;
use polars::prelude::*;

/// Spread between the extreme buckets of a sorted return frame.
///
/// `returns` is a per-(period, label) frame as produced by
/// [`crate::returns::portfolio_returns`]. The spread is
/// `top - bottom` of `ret_col`; set `invert` for sorts where a higher
/// bucket means *less* of the priced exposure (size: bucket 10 holds
/// the largest firms, so the size premium is the negated spread).
///
/// Output: `year`, `month`, `spread`.
pub fn long_short(
    returns: LazyFrame,
    label: &str,
    ret_col: &str,
    top: i32,
    bottom: i32,
    invert: bool,
) -> LazyFrame {
    let keys = [col(schema::YEAR), col(schema::MONTH)];

    let top_lf = returns
        .clone()
        .filter(col(label).eq(lit(top)))
        .select([
            col(schema::YEAR),
            col(schema::MONTH),
            col(ret_col).alias("top_ret"),
        ]);
    let bottom_lf = returns.filter(col(label).eq(lit(bottom))).select([
        col(schema::YEAR),
        col(schema::MONTH),
        col(ret_col).alias("bottom_ret"),
    ]);

    let sign = if invert { -1.0 } else { 1.0 };

    top_lf
        .join(bottom_lf, keys.clone(), keys, JoinArgs::new(JoinType::Inner))
        .with_columns([((col("top_ret") - col("bottom_ret")) * lit(sign)).alias("spread")])
        .select([col(schema::YEAR), col(schema::MONTH), col("spread")])
        .sort([schema::YEAR, schema::MONTH], Default::default())
}

/// One corner of the 2×3 cross as a named period series.
fn corner(
    two_way: LazyFrame,
    size_label: &str,
    value_label: &str,
    ret_col: &str,
    size: &str,
    value: &str,
    name: &str,
) -> LazyFrame {
    two_way
        .filter(
            col(size_label)
                .eq(lit(size))
                .and(col(value_label).eq(lit(value))),
        )
        .select([
            col(schema::YEAR),
            col(schema::MONTH),
            col(ret_col).alias(name),
        ])
}

/// Size and value factors from the 2×3 size × book-to-market cross.
///
/// `smb` is the small-stock average minus the big-stock average across
/// the three value corners; `hml` is the high-value average minus the
/// low-value average across the two size corners. Output carries the
/// six corner series alongside: `year`, `month`, `sl`, `sm`, `sh`,
/// `bl`, `bm`, `bh`, `smb`, `hml`. Periods missing any corner drop out.
pub fn smb_hml(
    two_way: LazyFrame,
    size_label: &str,
    value_label: &str,
    ret_col: &str,
) -> LazyFrame {
    let keys = [col(schema::YEAR), col(schema::MONTH)];

    let corners = [
        ("S", "L", "sl"),
        ("S", "M", "sm"),
        ("S", "H", "sh"),
        ("B", "L", "bl"),
        ("B", "M", "bm"),
        ("B", "H", "bh"),
    ];

    let mut joined: Option<LazyFrame> = None;
    for (size, value, name) in corners {
        let leg = corner(
            two_way.clone(),
            size_label,
            value_label,
            ret_col,
            size,
            value,
            name,
        );
        joined = Some(match joined {
            None => leg,
            Some(acc) => acc.join(
                leg,
                keys.clone(),
                keys.clone(),
                JoinArgs::new(JoinType::Inner),
            ),
        });
    }

    let smb = (col("sl") + col("sm") + col("sh")) / lit(3.0)
        - (col("bl") + col("bm") + col("bh")) / lit(3.0);
    let hml = (col("sh") + col("bh")) / lit(2.0) - (col("sl") + col("bl")) / lit(2.0);

    joined
        .expect("corner list is non-empty")
        .with_columns([smb.alias("smb"), hml.alias("hml")])
        .sort([schema::YEAR, schema::MONTH], Default::default())
}
