// App layer: interactive surfaces built on the projection core.

pub mod control_panel;
