//! Classification of learner options by the kind of value they take.

/// Learner options whose values are always integers.
///
/// Long options are listed without their leading dashes. Short options are
/// single letters and match only with a single dash.
const INTEGER_LONG: &[&str] = &[
    "bit_precision",
    "passes",
    "ngram",
    "skips",
    "rank",
    "lda",
    "holdout_period",
    "holdout_after",
    "early_terminate",
    "oaa",
    "ect",
    "csoaa",
    "wap",
    "nn",
    "bootstrap",
    "cb",
    "lrq_rank",
    "batch_size",
    "mem",
    "num_children",
    "initial_pass_length",
    "top",
];

const INTEGER_SHORT: &[&str] = &["b"];

/// Returns `true` if the option named by `token` expects an integer value.
///
/// Accepts the bare option (`--passes`, `-b`) or the option with an attached
/// value (`--passes=5`, `-b18`).
#[must_use]
pub fn expects_integer(token: &str) -> bool {
    if let Some(long) = token.strip_prefix("--") {
        let name = long.split_once('=').map_or(long, |(name, _)| name);
        return INTEGER_LONG.contains(&name);
    }

    let Some(short) = token.strip_prefix('-') else {
        return false;
    };
    short
        .get(..1)
        .is_some_and(|flag| INTEGER_SHORT.contains(&flag))
}
