//! Strongly-typed course and content identifiers.
//!
//! Courses exist under two key formats:
//! - slashed (deprecated): course `org/course/run`, content `i4x://org/course/type/id`
//! - v1: course `course-v1:org+course+run`, content `block-v1:org+course+run+type@t+block@id`
//!
//! Both formats of the same course compare equal; `Display` keeps the format a
//! key was created with.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

const COURSE_V1_PREFIX: &str = "course-v1:";
const BLOCK_V1_PREFIX: &str = "block-v1:";
const I4X_PREFIX: &str = "i4x://";

/// Block type of a course root.
const COURSE_BLOCK_TYPE: &str = "course";

/// Textual format of a key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyFormat {
    /// `org/course/run` and `i4x://` locations.
    Slashed,
    /// `course-v1:` and `block-v1:` keys.
    V1,
}

/// Canonical identifier of a course.
#[derive(Debug, Clone)]
pub struct CourseKey {
    org: String,
    course: String,
    run: String,
    format: KeyFormat,
}

impl CourseKey {
    pub fn new(
        org: impl Into<String>,
        course: impl Into<String>,
        run: impl Into<String>,
        format: KeyFormat,
    ) -> DomainResult<Self> {
        let key = Self {
            org: org.into(),
            course: course.into(),
            run: run.into(),
            format,
        };
        validate_component("org", &key.org)?;
        validate_component("course", &key.course)?;
        validate_component("run", &key.run)?;
        Ok(key)
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn run(&self) -> &str {
        &self.run
    }

    pub fn format(&self) -> KeyFormat {
        self.format
    }

    /// Same course, rendered in another format.
    pub fn with_format(&self, format: KeyFormat) -> Self {
        Self {
            format,
            ..self.clone()
        }
    }

    /// Build the location of a block inside this course.
    pub fn make_usage_key(
        &self,
        block_type: impl Into<String>,
        block_id: impl Into<String>,
    ) -> DomainResult<UsageKey> {
        let block_type = block_type.into();
        let block_id = block_id.into();
        validate_component("block type", &block_type)?;
        validate_component("block id", &block_id)?;
        Ok(UsageKey {
            course_key: self.clone(),
            block_type,
            block_id,
        })
    }

    /// Location of the course root block.
    ///
    /// Slashed courses name their root after the run; v1 courses always use `course`.
    pub fn root_usage_key(&self) -> UsageKey {
        let block_id = match self.format {
            KeyFormat::Slashed => self.run.clone(),
            KeyFormat::V1 => COURSE_BLOCK_TYPE.to_string(),
        };
        UsageKey {
            course_key: self.clone(),
            block_type: COURSE_BLOCK_TYPE.to_string(),
            block_id,
        }
    }

    /// Site-relative URL of a static asset uploaded to this course.
    pub fn asset_url(&self, name: &str) -> String {
        match self.format {
            KeyFormat::Slashed => format!("/c4x/{}/{}/asset/{}", self.org, self.course, name),
            KeyFormat::V1 => format!(
                "/asset-v1:{}+{}+{}+type@asset+block@{}",
                self.org, self.course, self.run, name
            ),
        }
    }

    fn identity(&self) -> (&str, &str, &str) {
        (&self.org, &self.course, &self.run)
    }
}

impl PartialEq for CourseKey {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for CourseKey {}

impl Hash for CourseKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for CourseKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CourseKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl core::fmt::Display for CourseKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.format {
            KeyFormat::Slashed => write!(f, "{}/{}/{}", self.org, self.course, self.run),
            KeyFormat::V1 => write!(f, "{COURSE_V1_PREFIX}{}+{}+{}", self.org, self.course, self.run),
        }
    }
}

impl FromStr for CourseKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rest, sep, format) = match s.strip_prefix(COURSE_V1_PREFIX) {
            Some(rest) => (rest, '+', KeyFormat::V1),
            None => (s, '/', KeyFormat::Slashed),
        };

        let parts: Vec<&str> = rest.split(sep).collect();
        match parts.as_slice() {
            [org, course, run] => Self::new(*org, *course, *run, format)
                .map_err(|e| DomainError::invalid_id(format!("CourseKey '{s}': {e}"))),
            _ => Err(DomainError::invalid_id(format!(
                "CourseKey '{s}': expected three components"
            ))),
        }
    }
}

impl Serialize for CourseKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CourseKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Location of a content block inside a course.
///
/// Rendered in the format of its course key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UsageKey {
    course_key: CourseKey,
    block_type: String,
    block_id: String,
}

impl UsageKey {
    /// Parse a content location and map it into `course`.
    ///
    /// Either format is accepted regardless of the course key's own format.
    /// `i4x://` locations carry no run, so only org and course are checked
    /// for them.
    pub fn parse_in_course(raw: &str, course: &CourseKey) -> DomainResult<Self> {
        let invalid = |why: &str| DomainError::invalid_id(format!("UsageKey '{raw}': {why}"));

        let (org, course_num, run, block_type, block_id) =
            if let Some(rest) = raw.strip_prefix(BLOCK_V1_PREFIX) {
                let parts: Vec<&str> = rest.split('+').collect();
                let [org, course_num, run, block_type, block_id] = parts.as_slice() else {
                    return Err(invalid("expected org+course+run+type@..+block@.."));
                };
                let block_type = block_type
                    .strip_prefix("type@")
                    .ok_or_else(|| invalid("missing type@"))?;
                let block_id = block_id
                    .strip_prefix("block@")
                    .ok_or_else(|| invalid("missing block@"))?;
                (*org, *course_num, Some(*run), block_type, block_id)
            } else if let Some(rest) = raw.strip_prefix(I4X_PREFIX) {
                let parts: Vec<&str> = rest.split('/').collect();
                let [org, course_num, block_type, block_id] = parts.as_slice() else {
                    return Err(invalid("expected org/course/type/id"));
                };
                (*org, *course_num, None, *block_type, *block_id)
            } else {
                return Err(invalid("unknown key format"));
            };

        let same_course = org == course.org
            && course_num == course.course
            && run.is_none_or(|run| run == course.run);
        if !same_course {
            return Err(invalid(&format!("does not belong to course {course}")));
        }

        course
            .make_usage_key(block_type, block_id)
            .map_err(|e| invalid(&e.to_string()))
    }

    pub fn course_key(&self) -> &CourseKey {
        &self.course_key
    }

    /// Content category (chapter, sequential, problem, ...).
    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    pub fn block_id(&self) -> &str {
        &self.block_id
    }
}

impl core::fmt::Display for UsageKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let ck = &self.course_key;
        match ck.format {
            KeyFormat::Slashed => write!(
                f,
                "{I4X_PREFIX}{}/{}/{}/{}",
                ck.org, ck.course, self.block_type, self.block_id
            ),
            KeyFormat::V1 => write!(
                f,
                "{BLOCK_V1_PREFIX}{}+{}+{}+type@{}+block@{}",
                ck.org, ck.course, ck.run, self.block_type, self.block_id
            ),
        }
    }
}

fn validate_component(what: &str, value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::invalid_id(format!("{what} is empty")));
    }
    let ok = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '~' | ':'));
    if !ok {
        return Err(DomainError::invalid_id(format!(
            "{what} '{value}' contains illegal characters"
        )));
    }
    Ok(())
}
