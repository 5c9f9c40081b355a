use std::slice::Iter;

use derive_more::{AsRef, Deref, Display};
use thiserror::Error;
use uuid::Uuid;

/// Catalog entry for a single exercise.
///
/// The `categories` sequence is ordered and never empty; its first element is
/// the primary category used for substitution grouping. `tags` and
/// `equipment` are descriptive only and ignored by the selection logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    id: ExerciseID,
    name: Name,
    movement_type: MovementType,
    categories: Vec<Category>,
    tags: Vec<String>,
    equipment: Vec<Equipment>,
}

impl Exercise {
    pub fn new(
        id: ExerciseID,
        name: Name,
        movement_type: MovementType,
        categories: Vec<Category>,
        tags: Vec<String>,
        equipment: Vec<Equipment>,
    ) -> Result<Self, ExerciseError> {
        if categories.is_empty() {
            return Err(ExerciseError::NoCategories);
        }
        Ok(Self {
            id,
            name,
            movement_type,
            categories,
            tags,
            equipment,
        })
    }

    #[must_use]
    pub fn id(&self) -> ExerciseID {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[must_use]
    pub fn movement_type(&self) -> MovementType {
        self.movement_type
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn primary_category(&self) -> Category {
        self.categories[0]
    }

    #[must_use]
    pub fn in_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ExerciseError {
    #[error("Exercise must have at least one category")]
    NoCategories,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.len();

        if len > 64 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

/// Muscle-group/movement tag used to balance exercise selection.
///
/// A closed enumeration; unknown tags are rejected when data is loaded
/// instead of silently producing empty candidate sets.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Category {
    UpperBodyPush,
    UpperBodyPull,
    KneeDominant,
    HipDominant,
    FullBody,
}

impl Category {
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Category::UpperBodyPush => "upper_body_push",
            Category::UpperBodyPull => "upper_body_pull",
            Category::KneeDominant => "knee_dominant",
            Category::HipDominant => "hip_dominant",
            Category::FullBody => "full_body",
        }
    }
}

impl Property for Category {
    fn iter() -> Iter<'static, Category> {
        static CATEGORIES: [Category; 5] = [
            Category::UpperBodyPush,
            Category::UpperBodyPull,
            Category::KneeDominant,
            Category::HipDominant,
            Category::FullBody,
        ];
        CATEGORIES.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Category::UpperBodyPush => "Upper Body Push",
            Category::UpperBodyPull => "Upper Body Pull",
            Category::KneeDominant => "Knee Dominant",
            Category::HipDominant => "Hip Dominant",
            Category::FullBody => "Full Body",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = CategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Category::iter()
            .find(|c| c.tag() == value)
            .copied()
            .ok_or_else(|| CategoryError::UnknownTag(value.to_string()))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum CategoryError {
    #[error("Unknown category tag `{0}`")]
    UnknownTag(String),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MovementType {
    Compound,
    Isolation,
    Hybrid,
}

impl MovementType {
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            MovementType::Compound => "compound",
            MovementType::Isolation => "isolation",
            MovementType::Hybrid => "hybrid",
        }
    }
}

impl Property for MovementType {
    fn iter() -> Iter<'static, MovementType> {
        static MOVEMENT_TYPES: [MovementType; 3] = [
            MovementType::Compound,
            MovementType::Isolation,
            MovementType::Hybrid,
        ];
        MOVEMENT_TYPES.iter()
    }

    fn name(self) -> &'static str {
        match self {
            MovementType::Compound => "Compound",
            MovementType::Isolation => "Isolation",
            MovementType::Hybrid => "Hybrid",
        }
    }
}

impl TryFrom<&str> for MovementType {
    type Error = MovementTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MovementType::iter()
            .find(|m| m.tag() == value)
            .copied()
            .ok_or_else(|| MovementTypeError::UnknownTag(value.to_string()))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum MovementTypeError {
    #[error("Unknown movement type `{0}`")]
    UnknownTag(String),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Machine,
    Bodyweight,
    BodyweightOrLoad,
    Cable,
    Kettlebell,
    Bench,
    Rack,
    TrapBar,
    Landmine,
    BattleRope,
    Sled,
    GhrBench,
    Bars,
}

impl Equipment {
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Equipment::Barbell => "barbell",
            Equipment::Dumbbell => "dumbbell",
            Equipment::Machine => "machine",
            Equipment::Bodyweight => "bodyweight",
            Equipment::BodyweightOrLoad => "bodyweight_or_load",
            Equipment::Cable => "cable",
            Equipment::Kettlebell => "kettlebell",
            Equipment::Bench => "bench",
            Equipment::Rack => "rack",
            Equipment::TrapBar => "trap_bar",
            Equipment::Landmine => "landmine",
            Equipment::BattleRope => "battle_rope",
            Equipment::Sled => "sled",
            Equipment::GhrBench => "ghr_bench",
            Equipment::Bars => "bars",
        }
    }
}

impl Property for Equipment {
    fn iter() -> Iter<'static, Equipment> {
        static EQUIPMENT: [Equipment; 15] = [
            Equipment::Barbell,
            Equipment::Dumbbell,
            Equipment::Machine,
            Equipment::Bodyweight,
            Equipment::BodyweightOrLoad,
            Equipment::Cable,
            Equipment::Kettlebell,
            Equipment::Bench,
            Equipment::Rack,
            Equipment::TrapBar,
            Equipment::Landmine,
            Equipment::BattleRope,
            Equipment::Sled,
            Equipment::GhrBench,
            Equipment::Bars,
        ];
        EQUIPMENT.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Equipment::Barbell => "Barbell",
            Equipment::Dumbbell => "Dumbbell",
            Equipment::Machine => "Machine",
            Equipment::Bodyweight => "Bodyweight",
            Equipment::BodyweightOrLoad => "Bodyweight or Load",
            Equipment::Cable => "Cable",
            Equipment::Kettlebell => "Kettlebell",
            Equipment::Bench => "Bench",
            Equipment::Rack => "Rack",
            Equipment::TrapBar => "Trap Bar",
            Equipment::Landmine => "Landmine",
            Equipment::BattleRope => "Battle Rope",
            Equipment::Sled => "Sled",
            Equipment::GhrBench => "GHR Bench",
            Equipment::Bars => "Bars",
        }
    }
}

impl TryFrom<&str> for Equipment {
    type Error = EquipmentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Equipment::iter()
            .find(|e| e.tag() == value)
            .copied()
            .ok_or_else(|| EquipmentError::UnknownTag(value.to_string()))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum EquipmentError {
    #[error("Unknown equipment tag `{0}`")]
    UnknownTag(String),
}

pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}
