//! Abstract sampling knobs to native parameters.
//!
//! Three knobs in `[0, 1]` (creativity, word variety, focus) are translated
//! into each provider family's sampling fields. A knob only ever fills a field
//! the caller left unset, so tuning an already tuned request changes nothing.

use crate::defaults::auto_tune::{DETERMINISTIC_SEED, DETERMINISTIC_THRESHOLD};
use crate::types::PromptOptions;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AutoTuneKnobs {
    pub creativity: Option<f64>,
    pub word_variety: Option<f64>,
    pub focus: Option<f64>,
}

impl AutoTuneKnobs {
    pub fn is_empty(&self) -> bool {
        self.creativity.is_none() && self.word_variety.is_none() && self.focus.is_none()
    }
}

/// Which translation table a provider uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningFamily {
    OpenAi,
    Anthropic,
    /// Native fields pass through untouched.
    Untuned,
}

pub fn auto_tune(family: TuningFamily, options: PromptOptions, knobs: &AutoTuneKnobs) -> PromptOptions {
    if knobs.is_empty() {
        return options;
    }
    let tuned = match family {
        TuningFamily::OpenAi => auto_tune_openai(options, knobs),
        TuningFamily::Anthropic => auto_tune_anthropic(options, knobs),
        TuningFamily::Untuned => options,
    };
    tracing::debug!(
        ?family,
        temperature = ?tuned.temperature,
        top_p = ?tuned.top_p,
        frequency_penalty = ?tuned.frequency_penalty,
        presence_penalty = ?tuned.presence_penalty,
        seed = ?tuned.seed,
        "auto-tuned sampling parameters"
    );
    tuned
}

fn nucleus(focus: f64) -> f64 {
    1.0 - (focus / 2.0).max(0.0)
}

/// OpenAI protocol: temperature, frequency/presence penalty, `top_p` and seed.
pub fn auto_tune_openai(mut options: PromptOptions, knobs: &AutoTuneKnobs) -> PromptOptions {
    if options.temperature.is_none()
        && let Some(creativity) = knobs.creativity
    {
        let temperature = match knobs.focus {
            Some(focus) => (creativity - focus).max(0.0),
            None => creativity,
        };
        options.temperature = Some(temperature);
        if options.seed.is_none() && temperature < DETERMINISTIC_THRESHOLD {
            options.seed = Some(DETERMINISTIC_SEED);
        }
    }

    if options.frequency_penalty.is_none()
        && let Some(word_variety) = knobs.word_variety
    {
        // [0, 1] onto [-2, 2]
        options.frequency_penalty = Some(word_variety * 4.0 - 2.0);
    }

    if let Some(focus) = knobs.focus {
        if options.presence_penalty.is_none() {
            // [0, 1] onto [2, -2]
            options.presence_penalty = Some(2.0 - focus * 4.0);
        }
        if options.top_p.is_none() {
            options.top_p = Some(nucleus(focus));
        }
    }

    options
}

/// Anthropic Messages API: temperature and `top_p` only. It has no seed.
pub fn auto_tune_anthropic(mut options: PromptOptions, knobs: &AutoTuneKnobs) -> PromptOptions {
    if options.temperature.is_some() {
        return options;
    }

    options.temperature = match (knobs.creativity, knobs.word_variety) {
        (Some(creativity), Some(word_variety)) => Some((creativity + word_variety) / 2.0),
        (Some(creativity), None) => Some(creativity),
        (None, Some(word_variety)) => Some(word_variety),
        (None, None) => None,
    };

    if let Some(focus) = knobs.focus {
        options.temperature = Some((options.temperature.unwrap_or(0.0) - focus).max(0.0));
        if options.top_p.is_none() {
            options.top_p = Some(nucleus(focus));
        }
    }

    options
}
