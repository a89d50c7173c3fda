pub mod app;
pub mod character_select;
pub mod coming_soon_popup;
pub mod overlay_host;
pub mod rotate_prompt;
pub mod story_overlay;
pub mod touch_controls;
pub mod tutorial_overlay;
