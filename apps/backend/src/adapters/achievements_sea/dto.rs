//! DTOs for achievements_sea adapter.

#[derive(Debug, Clone)]
pub struct AchievementCreate {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub requirement_type: String,
    pub requirement_value: i64,
}

impl AchievementCreate {
    pub fn new(
        name: impl Into<String>,
        requirement_type: impl Into<String>,
        requirement_value: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            icon: String::new(),
            requirement_type: requirement_type.into(),
            requirement_value,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}
