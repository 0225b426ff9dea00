use uuid::Uuid;

/// Strongly typed ID for videos
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoID(pub Uuid);

impl Default for VideoID {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoID {
    pub fn new() -> Self {
        VideoID(Uuid::now_v7())
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for VideoID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for VideoID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for courses
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CourseID(pub Uuid);

impl Default for CourseID {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseID {
    pub fn new() -> Self {
        CourseID(Uuid::now_v7())
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for CourseID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for CourseID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
