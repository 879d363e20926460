//! Reshape a provider result record into the canonical `verbose_json` schema

use crate::types::{ProviderResult, Segment, Usage, VerboseResponse, Word};

/// Detail level and fallbacks for [`normalize`]
#[derive(Debug, Default)]
pub struct NormalizeOptions<'a> {
    /// Include per-segment detail; when false the `segments` key is still
    /// emitted but always empty
    pub segments: bool,
    /// Collect a flattened word list across all segments
    pub words: bool,
    /// Language to report when the provider did not detect one
    pub fallback_language: Option<&'a str>,
}

/// Build a [`VerboseResponse`] from a provider result
///
/// The provider record is treated as untrusted: missing duration coerces
/// to 0, missing language falls back to the request hint and then to
/// "unknown", and word entries are only kept when the text is non-empty
/// and both timestamps are finite.
pub fn normalize(result: &ProviderResult, options: &NormalizeOptions<'_>) -> VerboseResponse {
    let info = result.transcription_info.as_ref();

    let duration = info.and_then(|i| i.duration).unwrap_or(0.0);

    let language = info
        .and_then(|i| i.language.clone())
        .or_else(|| options.fallback_language.map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());

    let segments = if options.segments {
        result
            .segments
            .iter()
            .flatten()
            .enumerate()
            .map(|(id, segment)| Segment {
                id,
                seek: 0,
                start: segment.start,
                end: segment.end,
                text: segment.text.clone(),
                temperature: segment.temperature,
                avg_logprob: segment.avg_logprob,
                compression_ratio: segment.compression_ratio,
                no_speech_prob: segment.no_speech_prob,
            })
            .collect()
    } else {
        Vec::new()
    };

    let words = options.words.then(|| collect_words(result)).filter(|w| !w.is_empty());

    VerboseResponse {
        task: "transcribe",
        language,
        duration,
        text: result.text.clone(),
        segments,
        words,
        usage: Usage {
            r#type: "duration",
            seconds: billed_seconds(duration),
        },
    }
}

/// Flatten valid words across all segments, preserving order
fn collect_words(result: &ProviderResult) -> Vec<Word> {
    result
        .segments
        .iter()
        .flatten()
        .flat_map(|segment| segment.words.iter().flatten())
        .filter_map(|word| {
            let start = word.start?;
            let end = word.end?;
            if word.word.is_empty() || !start.is_finite() || !end.is_finite() {
                return None;
            }
            Some(Word {
                word: word.word.clone(),
                start,
                end,
            })
        })
        .collect()
}

/// Integer billing granularity: ceiling of the duration, minimum 1 second
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn billed_seconds(duration: f64) -> u64 {
    let ceiled = duration.ceil();
    if ceiled.is_finite() && ceiled >= 1.0 {
        ceiled as u64
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ProviderResult {
        serde_json::from_value(serde_json::json!({
            "text": "hello",
            "transcription_info": {"duration": 2.4, "language": "en"},
            "segments": [{
                "start": 0.0,
                "end": 2.4,
                "text": "hello",
                "words": [{"word": "hello", "start": 0.0, "end": 1.0}]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn full_detail_scenario() {
        let response = normalize(
            &sample_result(),
            &NormalizeOptions {
                segments: true,
                words: true,
                fallback_language: None,
            },
        );

        assert_eq!(response.task, "transcribe");
        assert_eq!(response.language, "en");
        assert!((response.duration - 2.4).abs() < f64::EPSILON);
        assert_eq!(response.text, "hello");

        assert_eq!(response.segments.len(), 1);
        assert_eq!(response.segments[0].id, 0);
        assert_eq!(response.segments[0].seek, 0);
        assert_eq!(response.segments[0].text, "hello");

        let words = response.words.unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "hello");

        assert_eq!(response.usage.r#type, "duration");
        assert_eq!(response.usage.seconds, 3);
    }

    #[test]
    fn segments_disabled_yields_empty_sequence() {
        let response = normalize(
            &sample_result(),
            &NormalizeOptions {
                segments: false,
                words: false,
                fallback_language: None,
            },
        );

        assert!(response.segments.is_empty());
        assert!(response.words.is_none());

        // The key itself is still serialized
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["segments"], serde_json::json!([]));
    }

    #[test]
    fn words_key_omitted_when_no_valid_words() {
        let result: ProviderResult = serde_json::from_value(serde_json::json!({
            "text": "hi",
            "segments": [{
                "start": 0.0,
                "end": 1.0,
                "text": "hi",
                "words": [
                    {"word": "", "start": 0.0, "end": 0.5},
                    {"word": "hi", "start": "soon", "end": 0.5}
                ]
            }]
        }))
        .unwrap();

        let response = normalize(
            &result,
            &NormalizeOptions {
                segments: true,
                words: true,
                fallback_language: None,
            },
        );

        assert!(response.words.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("words").is_none());
    }

    #[test]
    fn words_flatten_across_segments_in_order() {
        let result: ProviderResult = serde_json::from_value(serde_json::json!({
            "text": "one two",
            "segments": [
                {"start": 0.0, "end": 1.0, "text": "one",
                 "words": [{"word": "one", "start": 0.0, "end": 0.9}]},
                {"start": 1.0, "end": 2.0, "text": "two",
                 "words": [{"word": "two", "start": 1.1, "end": 1.9}]}
            ]
        }))
        .unwrap();

        let response = normalize(
            &result,
            &NormalizeOptions {
                segments: true,
                words: true,
                fallback_language: None,
            },
        );

        let words = response.words.unwrap();
        assert_eq!(words.iter().map(|w| w.word.as_str()).collect::<Vec<_>>(), ["one", "two"]);

        assert_eq!(response.segments[0].id, 0);
        assert_eq!(response.segments[1].id, 1);
    }

    #[test]
    fn language_falls_back_to_hint_then_unknown() {
        let bare = ProviderResult::default();

        let with_hint = normalize(
            &bare,
            &NormalizeOptions {
                segments: false,
                words: false,
                fallback_language: Some("fr"),
            },
        );
        assert_eq!(with_hint.language, "fr");

        let without_hint = normalize(&bare, &NormalizeOptions::default());
        assert_eq!(without_hint.language, "unknown");
    }

    #[test]
    fn usage_is_at_least_one_second() {
        let cases = [
            (serde_json::json!({"text": ""}), 1),
            (serde_json::json!({"text": "", "transcription_info": {"duration": 0}}), 1),
            (serde_json::json!({"text": "", "transcription_info": {"duration": -3.0}}), 1),
            (serde_json::json!({"text": "", "transcription_info": {"duration": "oops"}}), 1),
            (serde_json::json!({"text": "", "transcription_info": {"duration": 0.01}}), 1),
            (serde_json::json!({"text": "", "transcription_info": {"duration": 2.4}}), 3),
            (serde_json::json!({"text": "", "transcription_info": {"duration": 5}}), 5),
        ];

        for (value, expected) in cases {
            let result: ProviderResult = serde_json::from_value(value).unwrap();
            let response = normalize(&result, &NormalizeOptions::default());
            assert_eq!(response.usage.seconds, expected, "duration case failed");
        }
    }

    #[test]
    fn optional_segment_scalars_are_passed_through_or_omitted() {
        let result: ProviderResult = serde_json::from_value(serde_json::json!({
            "text": "hi",
            "segments": [{"start": 0.0, "end": 1.0, "text": "hi", "temperature": 0.2}]
        }))
        .unwrap();

        let response = normalize(
            &result,
            &NormalizeOptions {
                segments: true,
                words: false,
                fallback_language: None,
            },
        );

        let json = serde_json::to_value(&response).unwrap();
        let segment = &json["segments"][0];
        assert_eq!(segment["temperature"], serde_json::json!(0.2));
        assert!(segment.get("avg_logprob").is_none());
        assert!(segment.get("no_speech_prob").is_none());
    }
}
