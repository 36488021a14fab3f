//! The interview panel — a fixed roster of four interviewer personas.
//!
//! One canonical `Persona` record with every field required; the roster is
//! static configuration shared by all sessions and validated once at
//! startup. Question rotation is a pure function of the question index.

use anyhow::{ensure, Result};
use serde::Serialize;

/// Voice parameters handed to the speech-synthesis collaborator alongside
/// each spoken question.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceParams {
    /// Preferred synthesizer voice; the UI falls back by `gender` when the
    /// named voice is unavailable.
    pub preferred_voice: &'static str,
    pub gender: VoiceGender,
    /// Relative speech rate (1.0 = normal).
    pub rate: f32,
    /// Relative pitch (0.0–2.0, 1.0 = normal).
    pub pitch: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    Male,
    Female,
}

/// A fixed simulated interviewer profile.
#[derive(Debug, Clone, Serialize)]
pub struct Persona {
    pub name: &'static str,
    pub role: &'static str,
    /// Interviewing style, used verbatim in prompts.
    pub style: &'static str,
    pub specialty: &'static str,
    /// Self-introduction spoken before question 1.
    pub intro: &'static str,
    pub voice: VoiceParams,
}

impl Persona {
    /// One-line descriptor used to put the model in character.
    pub fn descriptor(&self) -> String {
        format!(
            "{}, {} ({}, specialty: {})",
            self.name, self.role, self.style, self.specialty
        )
    }
}

/// The panel. Exactly four seats; question `i` belongs to seat `i % 4`.
pub static PANEL: [Persona; 4] = [
    Persona {
        name: "Dr. Arjun Sharma",
        role: "Principal Software Architect",
        style: "analytical and methodical, focuses on system design and architecture",
        specialty: "system design, architecture, scalability",
        intro: "I have over 20 years of experience building scalable systems for enterprises. \
                I enjoy diving deep into architecture and design challenges.",
        voice: VoiceParams {
            preferred_voice: "Google UK English Male",
            gender: VoiceGender::Male,
            rate: 1.0,
            pitch: 0.9,
        },
    },
    Persona {
        name: "Priya Venkatesh",
        role: "Senior Engineering Manager",
        style: "pragmatic and business-focused, interested in leadership and teamwork",
        specialty: "leadership, teamwork, project management",
        intro: "I lead cross-functional teams and focus on innovation and delivery. \
                I'm passionate about mentorship and building strong engineering cultures.",
        voice: VoiceParams {
            preferred_voice: "Google UK English Female",
            gender: VoiceGender::Female,
            rate: 1.1,
            pitch: 1.3,
        },
    },
    Persona {
        name: "Vikram Mehta",
        role: "Lead Backend Developer",
        style: "code-oriented and detail-driven, focuses on backend and implementation",
        specialty: "backend coding, technical implementation, problem-solving",
        intro: "I specialize in backend development and distributed systems. \
                I love solving complex problems and optimizing APIs.",
        voice: VoiceParams {
            preferred_voice: "Google US English",
            gender: VoiceGender::Male,
            rate: 1.05,
            pitch: 1.1,
        },
    },
    Persona {
        name: "Divya Patel",
        role: "DevOps Specialist",
        style: "automation-focused and security-conscious, specializes in infrastructure and operations",
        specialty: "DevOps, infrastructure, automation, security",
        intro: "I'm passionate about automation, cloud infrastructure, and security best practices. \
                I help teams deliver faster and safer.",
        voice: VoiceParams {
            preferred_voice: "Google US English Female",
            gender: VoiceGender::Female,
            rate: 1.0,
            pitch: 1.5,
        },
    },
];

/// Selects the persona for a question index: `PANEL[index % PANEL.len()]`.
/// Deterministic and stable across re-renders of the same index — voice and
/// labeling consistency depend on it.
pub fn persona_for(index: usize) -> &'static Persona {
    &PANEL[index % PANEL.len()]
}

/// Validates the static panel at startup. Catches an incomplete or
/// out-of-range persona edit before any session can observe it.
pub fn validate_panel() -> Result<()> {
    ensure!(!PANEL.is_empty(), "panel must have at least one persona");

    for persona in &PANEL {
        ensure!(!persona.name.trim().is_empty(), "persona has an empty name");
        for (field, value) in [
            ("role", persona.role),
            ("style", persona.style),
            ("specialty", persona.specialty),
            ("intro", persona.intro),
            ("preferred_voice", persona.voice.preferred_voice),
        ] {
            ensure!(
                !value.trim().is_empty(),
                "persona '{}' has an empty {field}",
                persona.name
            );
        }
        ensure!(
            (0.5..=2.0).contains(&persona.voice.rate),
            "persona '{}' has voice rate {} outside 0.5–2.0",
            persona.name,
            persona.voice.rate
        );
        ensure!(
            (0.0..=2.0).contains(&persona.voice.pitch),
            "persona '{}' has voice pitch {} outside 0.0–2.0",
            persona.name,
            persona.voice.pitch
        );
    }

    let mut names: Vec<&str> = PANEL.iter().map(|p| p.name).collect();
    names.sort_unstable();
    names.dedup();
    ensure!(names.len() == PANEL.len(), "panel names must be unique");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_for_is_deterministic() {
        for index in 0..32 {
            let first = persona_for(index);
            let second = persona_for(index);
            assert_eq!(first.name, second.name);
        }
    }

    #[test]
    fn test_persona_for_rotates_round_robin() {
        assert_eq!(persona_for(0).name, PANEL[0].name);
        assert_eq!(persona_for(1).name, PANEL[1].name);
        assert_eq!(persona_for(3).name, PANEL[3].name);
        assert_eq!(persona_for(4).name, PANEL[0].name);
        assert_eq!(persona_for(9).name, PANEL[1].name);
    }

    #[test]
    fn test_static_panel_passes_validation() {
        validate_panel().unwrap();
    }

    #[test]
    fn test_descriptor_mentions_name_and_specialty() {
        let descriptor = PANEL[0].descriptor();
        assert!(descriptor.contains(PANEL[0].name));
        assert!(descriptor.contains(PANEL[0].specialty));
    }
}
