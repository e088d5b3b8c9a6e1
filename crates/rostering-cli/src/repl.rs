//! Parsing of interactive chat input.

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Free text for the copilot.
    Say(String),
    /// Run the quick action with this label.
    Quick(String),
    /// List quick actions and suggestions.
    Actions,
    /// Clear the transcript.
    Reset,
    Quit,
    /// Blank line.
    Nothing,
    /// Unrecognized command, with a hint for the user.
    Unknown(String),
}

/// Interpret a line typed at the prompt.
///
/// `/q N` picks the N-th (1-based) entry of `labels`.
pub fn parse_input(line: &str, labels: &[String]) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Nothing;
    }

    let Some(command) = line.strip_prefix('/') else {
        return Input::Say(line.to_string());
    };

    let mut parts = command.splitn(2, char::is_whitespace);
    match (parts.next().unwrap_or_default(), parts.next().map(str::trim)) {
        ("quit" | "exit", _) => Input::Quit,
        ("actions", _) => Input::Actions,
        ("reset", _) => Input::Reset,
        ("q", Some(arg)) => match arg.parse::<usize>() {
            Ok(n) if (1..=labels.len()).contains(&n) => Input::Quick(labels[n - 1].clone()),
            _ => Input::Unknown(format!("no quick action '{arg}', try /actions")),
        },
        (other, _) => Input::Unknown(format!("unknown command '/{other}'")),
    }
}
