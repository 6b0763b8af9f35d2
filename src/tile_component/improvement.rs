/// Improvements written onto tiles by the generator, or read from pre-authored maps.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Improvement<'a> {
    AncientRuins,
    /// A pre-authored starting location of the named civilization.
    StartingLocation(&'a str),
}

impl Improvement<'_> {
    const STARTING_LOCATION_PREFIX: &'static str = "StartingLocation ";

    pub fn name(&self) -> String {
        match self {
            Improvement::AncientRuins => "Ancient ruins".to_owned(),
            Improvement::StartingLocation(civilization) => {
                format!("{}{}", Self::STARTING_LOCATION_PREFIX, civilization)
            }
        }
    }
}

impl<'a> Improvement<'a> {
    /// Parses an improvement name, returns `None` if it is not one of the improvements above.
    pub fn from_name(name: &'a str) -> Option<Self> {
        if name == "Ancient ruins" {
            Some(Improvement::AncientRuins)
        } else {
            name.strip_prefix(Self::STARTING_LOCATION_PREFIX)
                .map(Improvement::StartingLocation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Improvement;

    #[test]
    fn starting_location_name_round_trips() {
        let name = Improvement::StartingLocation("Rome").name();
        assert_eq!("StartingLocation Rome", name);
        assert_eq!(
            Some(Improvement::StartingLocation("Rome")),
            Improvement::from_name(&name)
        );
        assert_eq!(None, Improvement::from_name("Farm"));
    }
}
