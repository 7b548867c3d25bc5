
use rustc_hash::FxHashMap as HashMap;

/// Reported sex of a sequenced individual.
/// Parses from the single-letter and full lowercase forms used in trio definition files.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum_macros::Display, strum_macros::EnumString)]
pub enum Sex {
    #[strum(to_string = "M", serialize = "male")]
    Male,
    #[strum(to_string = "F", serialize = "female")]
    Female
}

/// Read-only mapping from (person identifier, sex) to family identifier.
/// Multiple probands of one family map to the same family identifier, which is
/// what lets us collapse variant calls shared between siblings.
#[derive(Clone, Debug, Default)]
pub struct FamilyMap {
    /// family identifier keyed by person identifier and sex
    members: HashMap<(String, Sex), String>
}

impl FamilyMap {
    pub fn new() -> FamilyMap {
        Default::default()
    }

    /// Adds one individual to the map, replacing any previous entry for the same key.
    pub fn insert(&mut self, person_id: String, sex: Sex, family_id: String) {
        self.members.insert((person_id, sex), family_id);
    }

    /// Looks up the family identifier for an individual.
    pub fn family_id(&self, person_id: &str, sex: Sex) -> Option<&str> {
        self.members.get(&(person_id.to_string(), sex)).map(|f| f.as_str())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<(String, Sex, String)> for FamilyMap {
    fn from_iter<T: IntoIterator<Item = (String, Sex, String)>>(iter: T) -> FamilyMap {
        let mut families = FamilyMap::new();
        for (person_id, sex, family_id) in iter {
            families.insert(person_id, sex, family_id);
        }
        families
    }
}
