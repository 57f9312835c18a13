#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    SetValue(f64),
    SetStepSize(f64),
    ConfigReload,
}

impl AppEvent {
    /// Parses one line of the control socket protocol: `value <n>`, `step <n>`
    /// or `reload`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?;
        let arg = parts.next();
        if parts.next().is_some() {
            return None;
        }

        match (command.to_ascii_lowercase().as_str(), arg) {
            ("value", Some(n)) => n.parse().ok().map(Self::SetValue),
            ("step", Some(n)) => n.parse().ok().map(Self::SetStepSize),
            ("reload", None) => Some(Self::ConfigReload),
            _ => None,
        }
    }
}
