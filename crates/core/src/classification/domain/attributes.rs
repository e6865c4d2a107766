use std::fmt;

/// Gender class in the order the gender network emits scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Age bracket in the order the age network emits scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBracket {
    Infant,
    EarlyChild,
    Child,
    Teen,
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 8] = [
        AgeBracket::Infant,
        AgeBracket::EarlyChild,
        AgeBracket::Child,
        AgeBracket::Teen,
        AgeBracket::YoungAdult,
        AgeBracket::Adult,
        AgeBracket::MiddleAged,
        AgeBracket::Senior,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::Infant => "(0-2)",
            AgeBracket::EarlyChild => "(4-6)",
            AgeBracket::Child => "(8-12)",
            AgeBracket::Teen => "(15-20)",
            AgeBracket::YoungAdult => "(25-32)",
            AgeBracket::Adult => "(38-43)",
            AgeBracket::MiddleAged => "(48-53)",
            AgeBracket::Senior => "(60-100)",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "(0-2)")]
    #[case(3, "(15-20)")]
    #[case(7, "(60-100)")]
    fn test_age_bracket_follows_network_order(#[case] index: usize, #[case] label: &str) {
        let bracket = AgeBracket::from_index(index).unwrap();
        assert_eq!(bracket.label(), label);
        assert_eq!(bracket.index(), index);
    }

    #[test]
    fn test_age_bracket_out_of_range() {
        assert_eq!(AgeBracket::from_index(8), None);
    }

    #[test]
    fn test_gender_order() {
        assert_eq!(Gender::from_index(0), Some(Gender::Male));
        assert_eq!(Gender::from_index(1), Some(Gender::Female));
        assert_eq!(Gender::from_index(2), None);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Gender::Female.to_string(), "Female");
        assert_eq!(AgeBracket::YoungAdult.to_string(), "(25-32)");
    }
}
