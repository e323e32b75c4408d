//! Pose library document types.

use serde::{Deserialize, Serialize};

use crate::alloc::ParamAssignment;

fn default_true() -> bool {
    true
}

fn default_motion_speed() -> f32 {
    1.0
}

/// Write-default policy applied to generated animator states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteDefaultPolicy {
    /// Follow whatever the avatar's existing animator layers use.
    MatchAvatar,
    /// Force write-defaults on for generated states.
    ForceOn,
    /// Force write-defaults off for generated states.
    ForceOff,
}

impl WriteDefaultPolicy {
    /// Returns the policy as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteDefaultPolicy::MatchAvatar => "match_avatar",
            WriteDefaultPolicy::ForceOn => "force_on",
            WriteDefaultPolicy::ForceOff => "force_off",
        }
    }
}

impl Default for WriteDefaultPolicy {
    fn default() -> Self {
        WriteDefaultPolicy::MatchAvatar
    }
}

impl std::fmt::Display for WriteDefaultPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WriteDefaultPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "match_avatar" => Ok(WriteDefaultPolicy::MatchAvatar),
            "force_on" => Ok(WriteDefaultPolicy::ForceOn),
            "force_off" => Ok(WriteDefaultPolicy::ForceOff),
            _ => Err(format!("unknown write-default policy: {}", s)),
        }
    }
}

/// Per-pose tracking and playback settings.
///
/// The six booleans select which body-part trackers stay live while the
/// pose is held; `looping` and `motion_speed` control clip playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSetting {
    #[serde(default = "default_true")]
    pub head: bool,
    #[serde(default = "default_true")]
    pub arm: bool,
    #[serde(default = "default_true")]
    pub foot: bool,
    #[serde(default = "default_true")]
    pub finger: bool,
    #[serde(default = "default_true")]
    pub locomotion: bool,
    #[serde(default = "default_true")]
    pub fx: bool,
    /// Whether the main clip loops while the pose is held.
    #[serde(rename = "loop", default = "default_true")]
    pub looping: bool,
    /// Playback speed of the main clip; 0 freezes on the first frame.
    #[serde(default = "default_motion_speed")]
    pub motion_speed: f32,
}

impl Default for TrackingSetting {
    fn default() -> Self {
        Self {
            head: true,
            arm: true,
            foot: true,
            finger: true,
            locomotion: true,
            fx: true,
            looping: true,
            motion_speed: 1.0,
        }
    }
}

/// A single authored pose: clips, thumbnail, audio, and tracking flags.
///
/// Asset references are project-relative path strings. The allocator
/// output lives in [`assignment`](Self::assignment), which is never
/// serialized so re-allocation cannot perturb the content hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseEntry {
    pub name: String,

    /// Render the thumbnail from the main clip instead of using an asset.
    #[serde(default)]
    pub auto_thumbnail: bool,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thumbnail: Option<String>,

    /// Transition clip played entering the pose.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub before_clip: Option<String>,

    /// Transition clip played leaving the pose.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub after_clip: Option<String>,

    /// The main held-pose clip.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub clip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub audio_clip: Option<String>,

    /// Expression-menu override; routes this pose outside the library menu.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target_menu: Option<String>,

    #[serde(default)]
    pub tracking: TrackingSetting,

    /// Allocator-assigned triple; `None` until allocation runs.
    #[serde(skip)]
    pub assignment: Option<ParamAssignment>,
}

impl PoseEntry {
    /// Creates a pose with authoring defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auto_thumbnail: true,
            thumbnail: None,
            before_clip: None,
            after_clip: None,
            clip: None,
            audio_clip: None,
            target_menu: None,
            tracking: TrackingSetting::default(),
            assignment: None,
        }
    }

    /// Creates a pose named after its main clip.
    pub fn with_clip(name: impl Into<String>, clip: impl Into<String>) -> Self {
        let mut pose = Self::new(name);
        pose.clip = Some(clip.into());
        pose
    }
}

/// A named, ordered group of poses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseCategory {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub poses: Vec<PoseEntry>,

    /// Expression-menu override for the whole category.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target_menu: Option<String>,
}

impl PoseCategory {
    /// Creates an empty category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            thumbnail: None,
            poses: Vec::new(),
            target_menu: None,
        }
    }

    /// Creates a category with the given poses.
    pub fn with_poses(name: impl Into<String>, poses: Vec<PoseEntry>) -> Self {
        let mut category = Self::new(name);
        category.poses = poses;
        category
    }
}

/// A pose library document.
///
/// This is the top-level unit the allocator and combiner operate on.
/// `name` doubles as the merge key: sibling documents sharing a name are
/// folded into one menu unless they carry a [`target_menu`](Self::target_menu)
/// override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoseLibrary {
    /// Display name and merge key.
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub categories: Vec<PoseCategory>,

    /// Expose an avatar-height adjustment parameter.
    #[serde(default = "default_true")]
    pub enable_height_param: bool,

    /// Expose a playback-speed parameter.
    #[serde(default = "default_true")]
    pub enable_speed_param: bool,

    /// Expose a mirror toggle.
    #[serde(default = "default_true")]
    pub enable_mirror_param: bool,

    /// Show per-tracker toggles in the generated menu.
    #[serde(default = "default_true")]
    pub enable_tracking_param: bool,

    /// Drive pose state through the late-sync path.
    #[serde(default = "default_true")]
    pub enable_deep_sync: bool,

    /// Keep eye-look active while posing.
    #[serde(default = "default_true")]
    pub enable_pose_space: bool,

    /// Reuse previously built artifacts keyed by the content hash.
    #[serde(default)]
    pub enable_use_cache: bool,

    #[serde(default = "default_true")]
    pub enable_locomotion_animator: bool,

    #[serde(default = "default_true")]
    pub enable_fx_animator: bool,

    #[serde(default)]
    pub write_default: WriteDefaultPolicy,

    /// Registers the generated menu under an existing menu asset.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target_menu: Option<String>,

    /// Splits the settings submenu out to a separate menu asset.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub settings_menu: Option<String>,

    /// Content hash of the document; `None` until allocation runs.
    #[serde(skip)]
    pub guid: Option<String>,
}

impl Default for PoseLibrary {
    fn default() -> Self {
        Self {
            name: String::new(),
            thumbnail: None,
            categories: Vec::new(),
            enable_height_param: true,
            enable_speed_param: true,
            enable_mirror_param: true,
            enable_tracking_param: true,
            enable_deep_sync: true,
            enable_pose_space: true,
            enable_use_cache: false,
            enable_locomotion_animator: true,
            enable_fx_animator: true,
            write_default: WriteDefaultPolicy::MatchAvatar,
            target_menu: None,
            settings_menu: None,
            guid: None,
        }
    }
}

impl PoseLibrary {
    /// Creates a new library builder.
    pub fn builder(name: impl Into<String>) -> LibraryBuilder {
        LibraryBuilder::new(name)
    }

    /// Parses a library from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a library from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Serializes the library to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the library to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the library to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Iterates over all poses in document order.
    pub fn poses(&self) -> impl Iterator<Item = &PoseEntry> {
        self.categories.iter().flat_map(|c| c.poses.iter())
    }

    /// Total number of poses across all categories.
    pub fn pose_count(&self) -> usize {
        self.categories.iter().map(|c| c.poses.len()).sum()
    }

    /// Distinct parameter names in document order.
    ///
    /// Empty until [`update_parameters`](crate::alloc::update_parameters)
    /// has run.
    pub fn parameters(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for pose in self.poses() {
            if let Some(assignment) = &pose.assignment {
                if !names.contains(&assignment.parameter) {
                    names.push(assignment.parameter.clone());
                }
            }
        }
        names
    }

    /// True when any pose carries an audio clip.
    pub fn audio_mode(&self) -> bool {
        self.poses().any(|p| p.audio_clip.is_some())
    }
}

/// Builder for constructing [`PoseLibrary`] instances.
#[derive(Debug, Clone)]
pub struct LibraryBuilder {
    library: PoseLibrary,
}

impl LibraryBuilder {
    /// Creates a new library builder.
    pub fn new(name: impl Into<String>) -> Self {
        let mut library = PoseLibrary::default();
        library.name = name.into();
        Self { library }
    }

    /// Sets the library thumbnail.
    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.library.thumbnail = Some(thumbnail.into());
        self
    }

    /// Adds a category.
    pub fn category(mut self, category: PoseCategory) -> Self {
        self.library.categories.push(category);
        self
    }

    /// Sets all categories.
    pub fn categories(mut self, categories: Vec<PoseCategory>) -> Self {
        self.library.categories = categories;
        self
    }

    /// Sets the height-parameter toggle.
    pub fn height_param(mut self, enabled: bool) -> Self {
        self.library.enable_height_param = enabled;
        self
    }

    /// Sets the speed-parameter toggle.
    pub fn speed_param(mut self, enabled: bool) -> Self {
        self.library.enable_speed_param = enabled;
        self
    }

    /// Sets the mirror-parameter toggle.
    pub fn mirror_param(mut self, enabled: bool) -> Self {
        self.library.enable_mirror_param = enabled;
        self
    }

    /// Sets the tracking-menu toggle.
    pub fn tracking_param(mut self, enabled: bool) -> Self {
        self.library.enable_tracking_param = enabled;
        self
    }

    /// Sets the deep-sync toggle.
    pub fn deep_sync(mut self, enabled: bool) -> Self {
        self.library.enable_deep_sync = enabled;
        self
    }

    /// Sets the pose-space toggle.
    pub fn pose_space(mut self, enabled: bool) -> Self {
        self.library.enable_pose_space = enabled;
        self
    }

    /// Sets the build-cache toggle.
    pub fn use_cache(mut self, enabled: bool) -> Self {
        self.library.enable_use_cache = enabled;
        self
    }

    /// Sets the locomotion-animator toggle.
    pub fn locomotion_animator(mut self, enabled: bool) -> Self {
        self.library.enable_locomotion_animator = enabled;
        self
    }

    /// Sets the FX-animator toggle.
    pub fn fx_animator(mut self, enabled: bool) -> Self {
        self.library.enable_fx_animator = enabled;
        self
    }

    /// Sets the write-default policy.
    pub fn write_default(mut self, policy: WriteDefaultPolicy) -> Self {
        self.library.write_default = policy;
        self
    }

    /// Sets the target-menu override.
    pub fn target_menu(mut self, menu: impl Into<String>) -> Self {
        self.library.target_menu = Some(menu.into());
        self
    }

    /// Sets the settings-menu override.
    pub fn settings_menu(mut self, menu: impl Into<String>) -> Self {
        self.library.settings_menu = Some(menu.into());
        self
    }

    /// Builds the library.
    pub fn build(self) -> PoseLibrary {
        self.library
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_default_policy_serde() {
        let policy = WriteDefaultPolicy::ForceOn;
        let json = serde_json::to_string(&policy).unwrap();
        assert_eq!(json, "\"force_on\"");

        let parsed: WriteDefaultPolicy = serde_json::from_str("\"match_avatar\"").unwrap();
        assert_eq!(parsed, WriteDefaultPolicy::MatchAvatar);
    }

    #[test]
    fn test_library_builder() {
        let library = PoseLibrary::builder("Photo Poses")
            .thumbnail("Textures/photo.png")
            .category(PoseCategory::with_poses(
                "Sitting",
                vec![PoseEntry::with_clip("Chair", "Animations/chair.anim")],
            ))
            .use_cache(true)
            .write_default(WriteDefaultPolicy::ForceOff)
            .build();

        assert_eq!(library.name, "Photo Poses");
        assert_eq!(library.categories.len(), 1);
        assert_eq!(library.pose_count(), 1);
        assert!(library.enable_use_cache);
        assert!(library.enable_height_param);
        assert_eq!(library.write_default, WriteDefaultPolicy::ForceOff);
        assert!(library.guid.is_none());
    }

    #[test]
    fn test_library_from_json_defaults() {
        let json = r#"{
            "name": "Dance",
            "categories": [
                {
                    "name": "Idle",
                    "poses": [
                        { "name": "Sway", "clip": "Animations/sway.anim" }
                    ]
                }
            ]
        }"#;

        let library = PoseLibrary::from_json(json).unwrap();
        assert_eq!(library.name, "Dance");
        assert!(library.enable_height_param);
        assert!(!library.enable_use_cache);
        assert_eq!(library.write_default, WriteDefaultPolicy::MatchAvatar);

        let pose = &library.categories[0].poses[0];
        assert!(pose.tracking.head);
        assert!(pose.tracking.looping);
        assert_eq!(pose.tracking.motion_speed, 1.0);
        assert!(pose.assignment.is_none());
    }

    #[test]
    fn test_library_rejects_unknown_fields() {
        let json = r#"{ "name": "x", "no_such_field": 1 }"#;
        assert!(PoseLibrary::from_json(json).is_err());
    }

    #[test]
    fn test_tracking_loop_field_name() {
        let json = serde_json::to_string(&TrackingSetting::default()).unwrap();
        assert!(json.contains("\"loop\":true"));
        assert!(!json.contains("looping"));
    }

    #[test]
    fn test_pose_count_and_audio_mode() {
        let mut library = PoseLibrary::builder("Props")
            .category(PoseCategory::with_poses(
                "A",
                vec![PoseEntry::new("one"), PoseEntry::new("two")],
            ))
            .category(PoseCategory::with_poses("B", vec![PoseEntry::new("three")]))
            .build();

        assert_eq!(library.pose_count(), 3);
        assert!(!library.audio_mode());

        library.categories[1].poses[0].audio_clip = Some("Audio/snap.wav".into());
        assert!(library.audio_mode());
    }

    #[test]
    fn test_json_round_trip() {
        let library = PoseLibrary::builder("Round Trip")
            .category(PoseCategory::with_poses(
                "Floor",
                vec![PoseEntry::with_clip("Kneel", "Animations/kneel.anim")],
            ))
            .settings_menu("Menus/settings.asset")
            .build();

        let json = library.to_json_pretty().unwrap();
        let parsed = PoseLibrary::from_json(&json).unwrap();
        assert_eq!(library, parsed);
    }
}
