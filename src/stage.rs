use std::fmt;

/// Position within a record that the parser resumes from on its next call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Stage {
    #[default]
    Header = 0,
    Sequence = 1,
    Separator = 2,
    Quality = 3,
}

impl Stage {
    /// The stage that follows this one; `Quality` wraps to `Header`.
    pub fn next(self) -> Self {
        match self {
            Stage::Header => Stage::Sequence,
            Stage::Sequence => Stage::Separator,
            Stage::Separator => Stage::Quality,
            Stage::Quality => Stage::Header,
        }
    }

    pub fn as_raw(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Stage {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Stage::Header),
            1 => Ok(Stage::Sequence),
            2 => Ok(Stage::Separator),
            3 => Ok(Stage::Quality),
            other => Err(other),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Header => "header",
            Stage::Sequence => "sequence",
            Stage::Separator => "separator",
            Stage::Quality => "quality",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        let mut stage = Stage::Header;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(stage);
            stage = stage.next();
        }
        assert_eq!(
            seen,
            vec![
                Stage::Header,
                Stage::Sequence,
                Stage::Separator,
                Stage::Quality,
                Stage::Header
            ]
        );
    }

    #[test]
    fn test_raw_encoding() {
        for stage in [Stage::Header, Stage::Sequence, Stage::Separator, Stage::Quality] {
            assert_eq!(Stage::try_from(stage.as_raw()), Ok(stage));
        }
        assert_eq!(Stage::try_from(4), Err(4));
        assert_eq!(Stage::try_from(u8::MAX), Err(u8::MAX));
    }
}
