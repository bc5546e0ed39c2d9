//! Response assembly.
//!
//! Turns a decoded request into the response the relay sends back: the
//! questions are echoed and each one gets exactly one answer, either
//! forwarded upstream or synthesized.

use log::{debug, warn};

use super::{Header, Message, Question, ResourceRecord};
use crate::config::{STATIC_ADDR, STATIC_TTL};
use crate::forwarder::Forwarder;

/// The answer used when no resolver is configured or forwarding failed.
pub fn static_answer(question: &Question) -> ResourceRecord {
    ResourceRecord::a(question.name.clone(), STATIC_TTL, STATIC_ADDR)
}

/// Build the response to `request`.
///
/// Questions are answered strictly one after another in request order; with
/// a forwarder the next question is not sent upstream until the previous
/// exchange has finished.
pub async fn build_response(request: &Message, forwarder: Option<&Forwarder>) -> Message {
    let mut answers = Vec::with_capacity(request.questions.len());

    for question in &request.questions {
        let answer = match forwarder {
            Some(forwarder) => match forwarder.resolve(question).await {
                Ok(answer) => {
                    debug!("Resolver answered {} via {}", question.name, forwarder.target());
                    answer
                }
                Err(e) => {
                    warn!(
                        "Forwarding {} to {} failed, using static answer: {}",
                        question.name,
                        forwarder.target(),
                        e
                    );
                    static_answer(question)
                }
            },
            None => static_answer(question),
        };
        answers.push(answer);
    }

    Message {
        header: Header {
            id: request.header.id,
            flags: Header::response_flags(request.header.flags),
            question_count: request.questions.len() as u16,
            answer_count: answers.len() as u16,
            authority_count: 0,
            additional_count: 0,
        },
        questions: request.questions.clone(),
        answers,
    }
}
