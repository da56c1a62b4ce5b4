use crate::models::StoryRequest;

pub const STORY_SYSTEM: &str = include_str!("../data/prompts/story_system.txt");
pub const STORY_OPENING: &str = include_str!("../data/prompts/story_opening.txt");
pub const STORY_CONTINUE: &str = include_str!("../data/prompts/story_continue.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is single-pass: placeholder-looking text inside a value is
/// copied through verbatim, and unknown placeholders are left as they are.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        result.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        let Some(close) = after_open.find("}}") else {
            result.push_str(&rest[open..]);
            return result;
        };

        let key = &after_open[..close];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => result.push_str(value),
            None => result.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after_open[close + 2..];
    }

    result.push_str(rest);
    result
}

/// Build the user turn for a story request.
///
/// A non-empty `context` means the reader is continuing an existing story and
/// `premise` carries the action they picked; otherwise `premise` seeds a new
/// opening.
pub fn story_user_prompt(request: &StoryRequest) -> String {
    match request.context() {
        Some(context) => render(
            STORY_CONTINUE,
            &[
                ("genre", request.genre.as_str()),
                ("context", context),
                ("premise", request.premise.as_str()),
            ],
        ),
        None => render(
            STORY_OPENING,
            &[
                ("genre", request.genre.as_str()),
                ("premise", request.premise.as_str()),
            ],
        ),
    }
}
