use std::{error::Error, fmt, fs, io, num::ParseIntError, path::Path};

/// Two-line score record persisted between sessions: the first line holds
/// the latest session score and the second the best score seen so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScoreRecord {
    /// Score banked by the most recent session.
    pub current: u32,
    /// Highest score banked by any session.
    pub top: u32,
}

impl ScoreRecord {
    /// Reads a record from disk.
    pub(crate) fn read(path: &Path) -> Result<Self, ScoreRecordError> {
        let contents = fs::read_to_string(path).map_err(ScoreRecordError::Io)?;
        Self::parse(&contents)
    }

    /// Writes the record to disk in its two-line format.
    pub(crate) fn write(&self, path: &Path) -> Result<(), ScoreRecordError> {
        fs::write(path, self.render()).map_err(ScoreRecordError::Io)
    }

    /// Banks a finished session's score, keeping the best score on record.
    #[must_use]
    pub(crate) fn bank(self, score: u32) -> Self {
        Self {
            current: score,
            top: self.top.max(score),
        }
    }

    fn parse(contents: &str) -> Result<Self, ScoreRecordError> {
        let mut lines = contents.lines();
        let current = lines
            .next()
            .ok_or(ScoreRecordError::MissingLine("current score"))?;
        let top = lines
            .next()
            .ok_or(ScoreRecordError::MissingLine("top score"))?;

        Ok(Self {
            current: current
                .trim()
                .parse()
                .map_err(ScoreRecordError::InvalidScore)?,
            top: top.trim().parse().map_err(ScoreRecordError::InvalidScore)?,
        })
    }

    fn render(&self) -> String {
        format!("{}\n{}\n", self.current, self.top)
    }
}

/// Errors that can occur while reading or writing the score record.
#[derive(Debug)]
pub(crate) enum ScoreRecordError {
    /// The record file could not be read or written.
    Io(io::Error),
    /// The record file was missing one of its two lines.
    MissingLine(&'static str),
    /// A score line did not hold a non-negative integer.
    InvalidScore(ParseIntError),
}

impl fmt::Display for ScoreRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "could not access the score record: {error}"),
            Self::MissingLine(line) => write!(f, "score record is missing the {line} line"),
            Self::InvalidScore(error) => write!(f, "score record holds a malformed score: {error}"),
        }
    }
}

impl Error for ScoreRecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::InvalidScore(error) => Some(error),
            Self::MissingLine(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_through_render() {
        let record = ScoreRecord {
            current: 2_400,
            top: 11_000,
        };
        let parsed = ScoreRecord::parse(&record.render()).expect("record parses");
        assert_eq!(parsed, record);
    }

    #[test]
    fn parse_tolerates_surrounding_whitespace() {
        let parsed = ScoreRecord::parse(" 400 \n 1000 \n").expect("record parses");
        assert_eq!(
            parsed,
            ScoreRecord {
                current: 400,
                top: 1_000,
            }
        );
    }

    #[test]
    fn banking_a_higher_score_raises_the_top() {
        let record = ScoreRecord {
            current: 500,
            top: 900,
        };
        let banked = record.bank(1_400);
        assert_eq!(banked.current, 1_400);
        assert_eq!(banked.top, 1_400);
    }

    #[test]
    fn banking_a_lower_score_keeps_the_top() {
        let record = ScoreRecord {
            current: 500,
            top: 900,
        };
        let banked = record.bank(100);
        assert_eq!(banked.current, 100);
        assert_eq!(banked.top, 900);
    }

    #[test]
    fn truncated_record_is_rejected() {
        assert!(matches!(
            ScoreRecord::parse("1200\n"),
            Err(ScoreRecordError::MissingLine("top score"))
        ));
    }

    #[test]
    fn malformed_score_is_rejected() {
        assert!(matches!(
            ScoreRecord::parse("abc\n900\n"),
            Err(ScoreRecordError::InvalidScore(_))
        ));
    }
}
