//! Token usage accounting
//!
//! [`add_usage`] and [`subtract_usage`] work leaf-by-leaf over the three
//! top-level counters and every key of the two breakdown maps. A key missing
//! on one side counts as zero, so provider-specific categories introduced by
//! either operand always reach the result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open breakdown of token counts keyed by category (e.g. `cache_read`, `reasoning`).
///
/// Values do not need to sum to the parent counter.
pub type TokenDetails = BTreeMap<String, u64>;

/// Usage metadata for a message, such as token counts.
///
/// ```json
/// {
///   "input_tokens": 350,
///   "output_tokens": 240,
///   "total_tokens": 590,
///   "input_token_details": {"audio": 10, "cache_creation": 200, "cache_read": 100},
///   "output_token_details": {"audio": 10, "reasoning": 200}
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageMetadata {
    /// Count of input (prompt) tokens
    pub input_tokens: u64,
    /// Count of output (completion) tokens
    pub output_tokens: u64,
    /// Total token count
    pub total_tokens: u64,
    /// Breakdown of input token counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_token_details: Option<TokenDetails>,
    /// Breakdown of output token counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_token_details: Option<TokenDetails>,
}

impl UsageMetadata {
    /// Usage with `total_tokens = input_tokens + output_tokens`
    pub const fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens.saturating_add(output_tokens),
            input_token_details: None,
            output_token_details: None,
        }
    }

    /// Create a builder for usage with breakdown details
    pub fn builder() -> UsageMetadataBuilder {
        UsageMetadataBuilder::default()
    }
}

/// Builder for [`UsageMetadata`]
#[derive(Debug, Clone, Default)]
pub struct UsageMetadataBuilder {
    input_tokens: u64,
    output_tokens: u64,
    total_tokens: Option<u64>,
    input_token_details: Option<TokenDetails>,
    output_token_details: Option<TokenDetails>,
}

impl UsageMetadataBuilder {
    pub fn input_tokens(mut self, tokens: u64) -> Self {
        self.input_tokens = tokens;
        self
    }

    pub fn output_tokens(mut self, tokens: u64) -> Self {
        self.output_tokens = tokens;
        self
    }

    /// Explicit total; defaults to input + output
    pub fn total_tokens(mut self, tokens: u64) -> Self {
        self.total_tokens = Some(tokens);
        self
    }

    pub fn input_detail(mut self, category: impl Into<String>, tokens: u64) -> Self {
        self.input_token_details
            .get_or_insert_with(TokenDetails::new)
            .insert(category.into(), tokens);
        self
    }

    pub fn output_detail(mut self, category: impl Into<String>, tokens: u64) -> Self {
        self.output_token_details
            .get_or_insert_with(TokenDetails::new)
            .insert(category.into(), tokens);
        self
    }

    pub fn build(self) -> UsageMetadata {
        UsageMetadata {
            input_tokens: self.input_tokens,
            output_tokens: self.output_tokens,
            total_tokens: self
                .total_tokens
                .unwrap_or_else(|| self.input_tokens.saturating_add(self.output_tokens)),
            input_token_details: self.input_token_details,
            output_token_details: self.output_token_details,
        }
    }
}

/// Add two usages leaf-by-leaf.
///
/// Both absent yields zeroed usage; exactly one present is returned as is.
pub fn add_usage(left: Option<&UsageMetadata>, right: Option<&UsageMetadata>) -> UsageMetadata {
    match (left, right) {
        (Some(l), Some(r)) => combine(l, r, u64::saturating_add),
        (Some(one), None) | (None, Some(one)) => one.clone(),
        (None, None) => UsageMetadata::default(),
    }
}

/// Subtract two usages leaf-by-leaf, flooring every count at zero.
///
/// Presence rules match [`add_usage`]: when only `right` is present it is
/// returned as is.
pub fn subtract_usage(
    left: Option<&UsageMetadata>,
    right: Option<&UsageMetadata>,
) -> UsageMetadata {
    match (left, right) {
        (Some(l), Some(r)) => combine(l, r, u64::saturating_sub),
        (Some(one), None) | (None, Some(one)) => one.clone(),
        (None, None) => UsageMetadata::default(),
    }
}

fn combine(left: &UsageMetadata, right: &UsageMetadata, op: fn(u64, u64) -> u64) -> UsageMetadata {
    UsageMetadata {
        input_tokens: op(left.input_tokens, right.input_tokens),
        output_tokens: op(left.output_tokens, right.output_tokens),
        total_tokens: op(left.total_tokens, right.total_tokens),
        input_token_details: combine_details(
            left.input_token_details.as_ref(),
            right.input_token_details.as_ref(),
            op,
        ),
        output_token_details: combine_details(
            left.output_token_details.as_ref(),
            right.output_token_details.as_ref(),
            op,
        ),
    }
}

fn combine_details(
    left: Option<&TokenDetails>,
    right: Option<&TokenDetails>,
    op: fn(u64, u64) -> u64,
) -> Option<TokenDetails> {
    if left.is_none() && right.is_none() {
        return None;
    }
    let empty = TokenDetails::new();
    let left = left.unwrap_or(&empty);
    let right = right.unwrap_or(&empty);
    let value = |map: &TokenDetails, key: &str| map.get(key).copied().unwrap_or(0);

    Some(
        left.keys()
            .chain(right.keys())
            .map(|key| (key.clone(), op(value(left, key), value(right, key))))
            .collect(),
    )
}

impl std::ops::Add for UsageMetadata {
    type Output = UsageMetadata;

    fn add(self, rhs: Self) -> Self::Output {
        add_usage(Some(&self), Some(&rhs))
    }
}

impl std::ops::Add for &UsageMetadata {
    type Output = UsageMetadata;

    fn add(self, rhs: Self) -> Self::Output {
        add_usage(Some(self), Some(rhs))
    }
}

impl std::ops::Sub for UsageMetadata {
    type Output = UsageMetadata;

    fn sub(self, rhs: Self) -> Self::Output {
        subtract_usage(Some(&self), Some(&rhs))
    }
}

impl std::ops::Sub for &UsageMetadata {
    type Output = UsageMetadata;

    fn sub(self, rhs: Self) -> Self::Output {
        subtract_usage(Some(self), Some(rhs))
    }
}
