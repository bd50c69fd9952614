use axum::{Json, extract::Query, extract::State};
use tracing::{debug, info, instrument};

use crate::pipeline::ChatReply;

use super::error::GatewayError;
use super::payload::{
    ChatRequest, ChatResponse, Diagnostics, ReportRequest, ReportResponse, SimilarCrimeDto,
    SimilarParams, SimilarResponse,
};
use super::state::HandlerState;

/// Sent when nothing in the corpus matched confidently. The pipeline reports
/// the outcome; the wording is a transport concern.
pub const NO_CONFIDENT_MATCH_REPLY: &str =
    "I'm not sure about that. Could you please rephrase or ask about a specific crime?";

/// Acknowledgment attached to every report response that carries advice.
pub const REPORT_ACK_MESSAGE: &str =
    "Report received. Remember, you're not alone — reach out to emergency services if you need immediate help.";

const DEFAULT_SIMILAR_N: usize = 3;

#[instrument(skip(state, request), fields(message_len = request.message.len()))]
pub async fn chat_handler(
    State(state): State<HandlerState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, GatewayError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "Please provide a message.".to_string(),
        ));
    }

    let reply = state.assistant.chat(message)?;

    let response = match reply {
        ChatReply::Answer {
            text,
            matched,
            score,
        } => {
            debug!(matched = matched.as_str(), score = score, "Chat answered");
            ChatResponse {
                reply: text,
                matched: matched.as_str().to_string(),
                score,
            }
        }
        ChatReply::NoConfidentMatch { best_score } => {
            debug!(best_score = best_score, "Chat fell back to rephrase prompt");
            ChatResponse {
                reply: NO_CONFIDENT_MATCH_REPLY.to_string(),
                matched: "none".to_string(),
                score: best_score,
            }
        }
    };

    Ok(Json(response))
}

#[instrument(skip(state, request), fields(summary_len = request.summary.len()))]
pub async fn report_handler(
    State(state): State<HandlerState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, GatewayError> {
    let summary = request.summary.trim();
    if summary.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "Please provide an incident summary.".to_string(),
        ));
    }

    if let Some(location) = &request.location {
        debug!(location = %location, "Report carries location metadata");
    }
    if let Some(category) = &request.category {
        debug!(category = %category, "Report carries category metadata");
    }

    let advice = state.assistant.report(summary).await?;

    let message = if advice.has_recommendations() {
        REPORT_ACK_MESSAGE.to_string()
    } else {
        format!(
            "No recommendations are available for: {}.",
            advice.detected_labels.join(", ")
        )
    };

    info!(
        labels = ?advice.detected_labels,
        recommendations = advice.recommendations.len(),
        "Report processed"
    );

    Ok(Json(ReportResponse {
        detected_labels: advice.detected_labels,
        recommendations: advice.recommendations,
        diagnostics: Diagnostics {
            user_sentiment: advice.user_sentiment,
        },
        message,
    }))
}

#[instrument(skip(state, params))]
pub async fn similar_handler(
    State(state): State<HandlerState>,
    Query(params): Query<SimilarParams>,
) -> Result<Json<SimilarResponse>, GatewayError> {
    let crime = params
        .crime
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            GatewayError::InvalidRequest(
                "Please specify a crime type to find similar crimes.".to_string(),
            )
        })?;

    let top_n = params.n.unwrap_or(DEFAULT_SIMILAR_N);
    let similar = state.assistant.similar_crimes(crime, top_n)?;

    Ok(Json(SimilarResponse {
        similar_crimes: similar
            .into_iter()
            .map(|c| SimilarCrimeDto {
                crime: c.crime,
                description: c.description,
                similarity: c.similarity,
            })
            .collect(),
    }))
}
