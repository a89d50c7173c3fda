// Device classification and orientation gate

/// Touch devices at most this wide are treated as phones/tablets.
pub const SMALL_VIEWPORT_MAX_PX: f64 = 900.0;

const MOBILE_UA_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceProfile {
    /// `ontouchstart` exists on the window.
    pub touch_events: bool,
    pub max_touch_points: i32,
    pub width: f64,
    pub height: f64,
    pub user_agent: String,
}

impl DeviceProfile {
    pub fn has_touch(&self) -> bool {
        self.touch_events || self.max_touch_points > 0
    }

    pub fn is_small(&self) -> bool {
        self.width <= SMALL_VIEWPORT_MAX_PX
    }

    pub fn ua_is_mobile(&self) -> bool {
        let ua = self.user_agent.to_ascii_lowercase();
        MOBILE_UA_MARKERS.iter().any(|m| ua.contains(m))
    }

    pub fn classify(&self) -> DeviceClass {
        if (self.has_touch() && self.is_small()) || self.ua_is_mobile() {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

/// Device class is decided once; afterwards only orientation changes.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportAdapter {
    class: DeviceClass,
    portrait: bool,
    tutorial_closed: bool,
}

impl ViewportAdapter {
    pub fn new(profile: &DeviceProfile) -> Self {
        Self {
            class: profile.classify(),
            portrait: profile.height > profile.width,
            tutorial_closed: false,
        }
    }

    pub fn class(&self) -> DeviceClass {
        self.class
    }

    pub fn is_mobile(&self) -> bool {
        self.class == DeviceClass::Mobile
    }

    pub fn is_portrait(&self) -> bool {
        self.portrait
    }

    /// Returns true when the orientation flipped.
    pub fn on_resize(&mut self, width: f64, height: f64) -> bool {
        let portrait = height > width;
        let changed = portrait != self.portrait;
        self.portrait = portrait;
        changed
    }

    pub fn rotate_prompt_visible(&self) -> bool {
        self.is_mobile() && self.portrait
    }

    /// Fullscreen and landscape lock are only attempted on mobile.
    pub fn wants_fullscreen(&self) -> bool {
        self.is_mobile()
    }

    /// Re-checked on every resize: a mobile device still held upright gets
    /// another fullscreen and landscape-lock attempt.
    pub fn wants_landscape_lock(&self) -> bool {
        self.is_mobile() && self.portrait
    }

    pub fn controls_visible(&self) -> bool {
        self.is_mobile() && self.tutorial_closed
    }

    pub fn tutorial_closed(&self) -> bool {
        self.tutorial_closed
    }

    /// One-shot; true only on the first call.
    pub fn on_tutorial_closed(&mut self) -> bool {
        !std::mem::replace(&mut self.tutorial_closed, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(touch: i32, w: f64, h: f64, ua: &str) -> DeviceProfile {
        DeviceProfile {
            touch_events: false,
            max_touch_points: touch,
            width: w,
            height: h,
            user_agent: ua.to_string(),
        }
    }

    #[test]
    fn classification_is_touch_and_small_or_ua() {
        assert_eq!(profile(5, 390.0, 844.0, "").classify(), DeviceClass::Mobile);
        assert_eq!(
            profile(10, 2560.0, 1440.0, "Windows NT").classify(),
            DeviceClass::Desktop
        );
        assert_eq!(
            profile(0, 1366.0, 1024.0, "Mozilla/5.0 (iPad; CPU OS 17_0)").classify(),
            DeviceClass::Mobile
        );
        assert_eq!(profile(0, 800.0, 600.0, "X11; Linux").classify(), DeviceClass::Desktop);
    }

    #[test]
    fn small_means_narrow() {
        // Touch laptop or landscape tablet wider than the cutoff
        assert_eq!(
            profile(5, 1024.0, 768.0, "Windows NT 10.0").classify(),
            DeviceClass::Desktop
        );
        assert_eq!(profile(5, 900.0, 1200.0, "").classify(), DeviceClass::Mobile);
        assert_eq!(profile(5, 901.0, 400.0, "").classify(), DeviceClass::Desktop);
    }

    #[test]
    fn touch_events_alone_count_as_touch() {
        let p = DeviceProfile {
            touch_events: true,
            ..profile(0, 768.0, 1024.0, "")
        };
        assert!(p.has_touch());
        assert_eq!(p.classify(), DeviceClass::Mobile);
        assert_eq!(profile(0, 768.0, 1024.0, "").classify(), DeviceClass::Desktop);
    }

    #[test]
    fn landscape_lock_retried_while_portrait() {
        let mut v = ViewportAdapter::new(&profile(5, 390.0, 844.0, "Android"));
        assert!(v.wants_landscape_lock());
        // Still portrait after a resize that doesn't flip orientation
        assert!(!v.on_resize(400.0, 850.0));
        assert!(v.wants_landscape_lock());
        v.on_resize(844.0, 390.0);
        assert!(!v.wants_landscape_lock());

        let desk = ViewportAdapter::new(&profile(0, 600.0, 900.0, "Macintosh"));
        assert!(!desk.wants_landscape_lock());
    }

    #[test]
    fn rotate_prompt_follows_orientation_after_first_check() {
        let mut v = ViewportAdapter::new(&profile(5, 390.0, 844.0, "Android"));
        assert!(v.rotate_prompt_visible());
        assert!(v.on_resize(844.0, 390.0));
        assert!(!v.rotate_prompt_visible());
        assert!(!v.on_resize(900.0, 400.0));
        assert!(v.is_mobile());
    }

    #[test]
    fn desktop_never_shows_rotate_prompt() {
        let mut v = ViewportAdapter::new(&profile(0, 600.0, 900.0, "Macintosh"));
        assert!(!v.rotate_prompt_visible());
        v.on_resize(500.0, 1000.0);
        assert!(!v.rotate_prompt_visible());
    }

    #[test]
    fn tutorial_closed_is_one_shot() {
        let mut v = ViewportAdapter::new(&profile(5, 844.0, 390.0, "iPhone"));
        assert!(!v.controls_visible());
        assert!(v.on_tutorial_closed());
        assert!(!v.on_tutorial_closed());
        assert!(v.controls_visible());
    }
}
