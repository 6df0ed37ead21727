// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Validated label and repository descriptors.
//!
//! Values in this module can only be obtained through their parsing
//! constructors, so holding one is proof that the configuration invariants
//! hold: colors are bare hex digits and repositories have exactly one owner
//! and one name.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::error::Error;

static HEX_COLOR: LazyLock<Regex,> = LazyLock::new(|| {
    Regex::new("^([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$",).expect("hex color pattern is valid",)
},);

/// Label color made of three or six hexadecimal digits, without `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash,)]
pub struct HexColor(String,);

impl HexColor
{
    /// Validates a user-supplied color and strips a single leading `#`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`](Error::Invalid) when the value is empty or
    /// is not a 3- or 6-digit hex code.
    ///
    /// # Examples
    ///
    /// ```
    /// use labelsync::HexColor;
    ///
    /// let color = HexColor::parse("#A0b1C2",)?;
    /// assert_eq!(color.as_str(), "A0b1C2");
    /// assert!(HexColor::parse("#abcd",).is_err());
    /// # Ok::<(), labelsync::Error>(())
    /// ```
    pub fn parse(raw: &str,) -> Result<Self, Error,>
    {
        if raw.is_empty() {
            return Err(Error::invalid("label color can not be empty",),);
        }

        let stripped = raw.strip_prefix('#',).unwrap_or(raw,);
        if !HEX_COLOR.is_match(stripped,) {
            return Err(Error::invalid(format!(
                "label color '{raw}' must be a 3 or 6 character hex code"
            ),),);
        }

        Ok(Self(stripped.to_owned(),),)
    }

    /// Returns the normalized color digits.
    pub fn as_str(&self,) -> &str
    {
        &self.0
    }
}

impl fmt::Display for HexColor
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(&self.0,)
    }
}

/// Desired state of one label.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct LabelSpec
{
    /// Label name, never empty.
    pub name:    String,
    /// Normalized color.
    pub color:   HexColor,
    /// Existing label to rename into this one, if any.
    pub replace: Option<String,>,
}

impl LabelSpec
{
    /// Builds a label from raw configuration values.
    ///
    /// An empty `replace` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`](Error::Invalid) when the name is empty or
    /// the color fails [`HexColor::parse`].
    pub fn new(name: &str, color: &str, replace: Option<&str,>,) -> Result<Self, Error,>
    {
        if name.is_empty() {
            return Err(Error::invalid("label name can not be empty",),);
        }

        let color = HexColor::parse(color,)?;
        let replace = replace.filter(|value| !value.is_empty(),).map(str::to_owned,);

        Ok(Self {
            name: name.to_owned(),
            color,
            replace,
        },)
    }
}

/// GitHub repository identified as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash,)]
pub struct RepositorySpec
{
    owner: String,
    name:  String,
}

impl RepositorySpec
{
    /// Account or organization owning the repository.
    pub fn owner(&self,) -> &str
    {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self,) -> &str
    {
        &self.name
    }
}

impl FromStr for RepositorySpec
{
    type Err = Error;

    /// Parses `owner/name`, requiring exactly two non-empty segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use labelsync::RepositorySpec;
    ///
    /// let repository: RepositorySpec = "octocat/hello-world".parse()?;
    /// assert_eq!(repository.owner(), "octocat");
    /// assert_eq!(repository.name(), "hello-world");
    /// assert!("octocat/".parse::<RepositorySpec>().is_err());
    /// # Ok::<(), labelsync::Error>(())
    /// ```
    fn from_str(raw: &str,) -> Result<Self, Self::Err,>
    {
        let mut segments = raw.split('/',);
        match (segments.next(), segments.next(), segments.next(),) {
            (Some(owner,), Some(name,), None,) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self {
                    owner: owner.to_owned(),
                    name:  name.to_owned(),
                },)
            }
            _ => Err(Error::invalid(format!(
                "invalid repo format '{raw}', should be owner/repo"
            ),),),
        }
    }
}

impl fmt::Display for RepositorySpec
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
