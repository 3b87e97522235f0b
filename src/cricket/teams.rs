//! Fixed team and venue enumerations.
//!
//! The display names double as the categorical values the classifier was
//! trained on, so they must stay byte-identical to the training data.
//! Variants are declared in alphabetical order of their names, which is the
//! order the pickers present them in.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Team {
    #[serde(rename = "Chennai Super Kings")]
    ChennaiSuperKings,
    #[serde(rename = "Delhi Capitals")]
    DelhiCapitals,
    #[serde(rename = "Kings XI Punjab")]
    KingsXiPunjab,
    #[serde(rename = "Kolkata Knight Riders")]
    KolkataKnightRiders,
    #[serde(rename = "Mumbai Indians")]
    MumbaiIndians,
    #[serde(rename = "Rajasthan Royals")]
    RajasthanRoyals,
    #[serde(rename = "Royal Challengers Bangalore")]
    RoyalChallengersBangalore,
    #[serde(rename = "Sunrisers Hyderabad")]
    SunrisersHyderabad,
}

impl Team {
    pub const ALL: [Team; 8] = [
        Team::ChennaiSuperKings,
        Team::DelhiCapitals,
        Team::KingsXiPunjab,
        Team::KolkataKnightRiders,
        Team::MumbaiIndians,
        Team::RajasthanRoyals,
        Team::RoyalChallengersBangalore,
        Team::SunrisersHyderabad,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Team::ChennaiSuperKings => "Chennai Super Kings",
            Team::DelhiCapitals => "Delhi Capitals",
            Team::KingsXiPunjab => "Kings XI Punjab",
            Team::KolkataKnightRiders => "Kolkata Knight Riders",
            Team::MumbaiIndians => "Mumbai Indians",
            Team::RajasthanRoyals => "Rajasthan Royals",
            Team::RoyalChallengersBangalore => "Royal Challengers Bangalore",
            Team::SunrisersHyderabad => "Sunrisers Hyderabad",
        }
    }

    /// Exact-match lookup. Surrounding whitespace is ignored, case is not.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Team::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum City {
    #[serde(rename = "Abu Dhabi")]
    AbuDhabi,
    Ahmedabad,
    Bangalore,
    Bengaluru,
    Bloemfontein,
    #[serde(rename = "Cape Town")]
    CapeTown,
    Centurion,
    Chandigarh,
    Chennai,
    Cuttack,
    Delhi,
    Dharamsala,
    Durban,
    #[serde(rename = "East London")]
    EastLondon,
    Hyderabad,
    Indore,
    Jaipur,
    Johannesburg,
    Kimberley,
    Kolkata,
    Mohali,
    Mumbai,
    Nagpur,
    #[serde(rename = "Port Elizabeth")]
    PortElizabeth,
    Pune,
    Raipur,
    Ranchi,
    Sharjah,
    Visakhapatnam,
}

impl City {
    pub const ALL: [City; 29] = [
        City::AbuDhabi,
        City::Ahmedabad,
        City::Bangalore,
        City::Bengaluru,
        City::Bloemfontein,
        City::CapeTown,
        City::Centurion,
        City::Chandigarh,
        City::Chennai,
        City::Cuttack,
        City::Delhi,
        City::Dharamsala,
        City::Durban,
        City::EastLondon,
        City::Hyderabad,
        City::Indore,
        City::Jaipur,
        City::Johannesburg,
        City::Kimberley,
        City::Kolkata,
        City::Mohali,
        City::Mumbai,
        City::Nagpur,
        City::PortElizabeth,
        City::Pune,
        City::Raipur,
        City::Ranchi,
        City::Sharjah,
        City::Visakhapatnam,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            City::AbuDhabi => "Abu Dhabi",
            City::Ahmedabad => "Ahmedabad",
            City::Bangalore => "Bangalore",
            City::Bengaluru => "Bengaluru",
            City::Bloemfontein => "Bloemfontein",
            City::CapeTown => "Cape Town",
            City::Centurion => "Centurion",
            City::Chandigarh => "Chandigarh",
            City::Chennai => "Chennai",
            City::Cuttack => "Cuttack",
            City::Delhi => "Delhi",
            City::Dharamsala => "Dharamsala",
            City::Durban => "Durban",
            City::EastLondon => "East London",
            City::Hyderabad => "Hyderabad",
            City::Indore => "Indore",
            City::Jaipur => "Jaipur",
            City::Johannesburg => "Johannesburg",
            City::Kimberley => "Kimberley",
            City::Kolkata => "Kolkata",
            City::Mohali => "Mohali",
            City::Mumbai => "Mumbai",
            City::Nagpur => "Nagpur",
            City::PortElizabeth => "Port Elizabeth",
            City::Pune => "Pune",
            City::Raipur => "Raipur",
            City::Ranchi => "Ranchi",
            City::Sharjah => "Sharjah",
            City::Visakhapatnam => "Visakhapatnam",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        City::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_names_are_sorted_and_unique() {
        let names: Vec<&str> = Team::ALL.iter().map(|t| t.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn city_names_are_sorted_and_unique() {
        let names: Vec<&str> = City::ALL.iter().map(|c| c.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 29);
    }

    #[test]
    fn lookup_round_trips_every_name() {
        for team in Team::ALL {
            assert_eq!(Team::from_name(team.name()), Some(team));
        }
        for city in City::ALL {
            assert_eq!(City::from_name(city.name()), Some(city));
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(Team::from_name("mumbai indians"), None);
        assert_eq!(Team::from_name("  Mumbai Indians "), Some(Team::MumbaiIndians));
        assert_eq!(City::from_name("cape town"), None);
        assert_eq!(City::from_name("Gqeberha"), None);
    }

    #[test]
    fn serialized_names_match_display_names() {
        for team in Team::ALL {
            let json = serde_json::to_string(&team).unwrap();
            assert_eq!(json, format!("\"{}\"", team.name()));
        }
        for city in City::ALL {
            let json = serde_json::to_string(&city).unwrap();
            assert_eq!(json, format!("\"{}\"", city.name()));
        }
    }
}
