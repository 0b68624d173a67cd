// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Instruction text for batch generation requests

use super::types::ContentKind;

/// Build the instruction text for one batch fetch
///
/// # Arguments
/// * `kind` - Content family to request
/// * `query` - Jurisdiction name for [`ContentKind::JurisdictionFeed`]
/// * `page` - 0-based page index; later pages steer the model away from
///   items already shown
/// * `count` - Number of records to request
pub fn batch_instructions(
    kind: ContentKind,
    query: Option<&str>,
    page: u32,
    count: usize,
) -> String {
    let subject = match kind {
        ContentKind::News => format!(
            "the {} most significant legal news items from India this month",
            count
        ),
        ContentKind::Articles => format!(
            "{} recent in-depth legal articles or commentary pieces relevant to Indian practice",
            count
        ),
        ContentKind::Judgments => format!(
            "{} notable recent judgments of the Supreme Court of India or the High Courts",
            count
        ),
        ContentKind::Statutes => format!(
            "{} Indian central or state statutes currently in force that practitioners consult often",
            count
        ),
        ContentKind::JurisdictionFeed => format!(
            "the {} most significant recent legal developments in {}",
            count,
            query.unwrap_or("India")
        ),
    };

    let mut instructions = format!(
        "You are a research assistant for a practicing law office. List {}. \
         Summaries must be two to three factual sentences in plain language.",
        subject
    );

    if page > 0 {
        instructions.push_str(&format!(
            " This is page {} of a paginated feed; return items distinct from the {} most \
             prominent ones a reader will already have seen.",
            page + 1,
            page as usize * count
        ));
    }

    instructions.push_str(
        " Every URL must be a complete working link to a freely accessible page. \
         Do not invent URLs, do not truncate them, and do not cite paywalled databases. \
         Omit a URL field entirely rather than guessing.",
    );

    instructions
}
