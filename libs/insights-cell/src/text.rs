use serde_json::Value;

use shared_models::insights::{InsightsResponse, SleepAnalysis};

/// Turns an insights payload into display text. Falls back to the raw JSON when
/// neither the summary nor the analysed-days count is present.
pub fn format_insight(data: &Value) -> String {
    let parsed = InsightsResponse::from_payload(data);
    let mut formatted = String::new();

    if let Some(insights) = parsed.insights.as_deref() {
        formatted.push_str(&format!("AI Health Analysis\n\n{}\n\n", insights));
    }

    if let Some(days) = parsed.data_points_analyzed {
        formatted.push_str(&format!("Analyzed {} days of health data.", days));
    }

    if formatted.is_empty() {
        raw(data)
    } else {
        formatted
    }
}

/// Best-effort text of an assistant reply.
pub fn reply_text(data: &Value) -> String {
    ["response", "reply", "advice", "message"]
        .iter()
        .find_map(|key| data.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| raw(data))
}

pub fn format_sleep(analysis: &SleepAnalysis) -> String {
    if !analysis.has_data() {
        return analysis
            .message
            .clone()
            .unwrap_or_else(|| "No sleep data available".to_string());
    }

    let mut lines = Vec::new();
    if let Some(hours) = analysis.average_sleep_hours {
        lines.push(format!("Average sleep: {:.1} hours", hours));
    }
    if let Some(quality) = analysis.average_sleep_quality {
        lines.push(format!("Average quality: {:.1}/10", quality));
    }
    if let Some(nights) = analysis.total_nights_tracked {
        lines.push(format!("Nights tracked: {}", nights));
    }
    if let Some(insights) = &analysis.insights {
        lines.push(insights.clone());
    }
    if let Some(recommendation) = &analysis.recommendation {
        lines.push(recommendation.clone());
    }

    lines.join("\n")
}

fn raw(data: &Value) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insight_with_summary_and_days() {
        let text = format_insight(&json!({ "insights": "Sleep improved", "data_points_analyzed": 14 }));

        assert!(text.contains("Sleep improved"));
        assert!(text.contains("Analyzed 14 days of health data."));
    }

    #[test]
    fn test_empty_object_falls_back_to_raw_json() {
        assert_eq!(format_insight(&json!({})), "{}");
    }

    #[test]
    fn test_days_only() {
        assert_eq!(format_insight(&json!({ "logs_analyzed": 3 })), "Analyzed 3 days of health data.");
    }

    #[test]
    fn test_backend_shape_with_both_counts() {
        let text = format_insight(&json!({
            "logs_analyzed": 14,
            "analysis_period_days": 30,
            "insights": "Sleep improved",
            "data_points_analyzed": 14
        }));

        assert!(text.starts_with("AI Health Analysis\n\nSleep improved"));
        assert!(text.contains("Analyzed 14 days of health data."));
    }

    #[test]
    fn test_float_count() {
        let text = format_insight(&json!({ "insights": "Steady", "data_points_analyzed": 14.0 }));

        assert!(text.contains("Analyzed 14 days of health data."));
    }

    #[test]
    fn test_no_data_message_is_dumped() {
        let data = json!({ "message": "No health data available.", "logs_count": 0 });

        assert_eq!(format_insight(&data), serde_json::to_string_pretty(&data).unwrap());
    }

    #[test]
    fn test_reply_text_prefers_known_keys() {
        assert_eq!(reply_text(&json!({ "response": "Drink water" })), "Drink water");
        assert_eq!(reply_text(&json!({ "advice": "Rest" })), "Rest");
        assert_eq!(reply_text(&json!({ "other": 1 })), "{\n  \"other\": 1\n}");
    }

    #[test]
    fn test_sleep_without_data_uses_server_message() {
        let analysis = SleepAnalysis {
            message: Some("No sleep data available".to_string()),
            ..SleepAnalysis::default()
        };

        assert_eq!(format_sleep(&analysis), "No sleep data available");
    }

    #[test]
    fn test_sleep_with_data() {
        let analysis = SleepAnalysis {
            average_sleep_hours: Some(6.4),
            average_sleep_quality: Some(7.0),
            total_nights_tracked: Some(12),
            recommendation: Some("Adults should aim for 7-9 hours of quality sleep per night.".to_string()),
            insights: None,
            message: None,
        };

        let text = format_sleep(&analysis);
        assert!(text.starts_with("Average sleep: 6.4 hours"));
        assert!(text.contains("Nights tracked: 12"));
    }
}
