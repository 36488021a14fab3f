// Cross-cutting prompt fragments shared by the interview and evaluation
// modules. Module-specific templates live next to their callers
// (interview/prompts.rs, evaluation/prompts.rs).

/// Shared preamble for every persona-voiced call.
pub const PANEL_SIMULATION_PREAMBLE: &str =
    "You are simulating one member of a real technical interview panel. \
    Stay fully in character for the panelist you are given and never mention \
    that you are an AI or part of a simulation.";

/// Output constraint for anything that will be spoken aloud by the UI's
/// speech synthesizer. The sanitizer strips leftovers, but asking first
/// keeps the cleanup boring.
pub const SPOKEN_OUTPUT_INSTRUCTION: &str =
    "Do not provide feedback, commentary, numbering, or markdown formatting. \
    Return only the question exactly as it would be spoken aloud.";
