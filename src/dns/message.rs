//! Whole DNS messages.

use super::header::HEADER_LEN;
use super::{Header, Question, ResourceRecord};
use crate::errors::Result;

/// A decoded message: header, questions and answers.
///
/// Authority and additional sections are neither parsed nor emitted; their
/// counts survive in `header` after decoding only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
}

impl Message {
    /// Decode the header, `QDCOUNT` questions and `ANCOUNT` answers.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let header = Header::decode(buf)?;
        let mut pos = HEADER_LEN;

        let mut questions = Vec::with_capacity(header.question_count.into());
        for _ in 0..header.question_count {
            let (question, next) = Question::decode(buf, pos)?;
            questions.push(question);
            pos = next;
        }

        let mut answers = Vec::with_capacity(header.answer_count.into());
        for _ in 0..header.answer_count {
            let (answer, next) = ResourceRecord::decode(buf, pos)?;
            answers.push(answer);
            pos = next;
        }

        Ok(Message {
            header,
            questions,
            answers,
        })
    }

    /// Serialize the message.
    ///
    /// Section counts are taken from the sections themselves, so the header
    /// never disagrees with what follows it.
    pub fn encode(&self) -> Vec<u8> {
        let header = Header {
            question_count: self.questions.len() as u16,
            answer_count: self.answers.len() as u16,
            authority_count: 0,
            additional_count: 0,
            ..self.header
        };

        let mut out = Vec::with_capacity(512);
        header.encode_into(&mut out);
        for question in &self.questions {
            question.encode_into(&mut out);
        }
        for answer in &self.answers {
            answer.encode_into(&mut out);
        }
        out
    }
}
