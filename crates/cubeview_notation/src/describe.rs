use crate::{Face, Modifier, Move};

impl Face {
    /// Returns a human-readable name for the layer turned by this letter,
    /// such as `"right face"` or `"two top layers"`.
    pub fn layer_name(self) -> &'static str {
        match self {
            Face::R => "right face",
            Face::L => "left face",
            Face::U => "top face",
            Face::D => "bottom face",
            Face::F => "front face",
            Face::B => "back face",
            Face::M => "middle slice",
            Face::E => "equatorial slice",
            Face::S => "standing slice",
            Face::X | Face::Y | Face::Z => "whole cube",
            Face::WideR => "two right layers",
            Face::WideL => "two left layers",
            Face::WideU => "two top layers",
            Face::WideD => "two bottom layers",
            Face::WideF => "two front layers",
            Face::WideB => "two back layers",
        }
    }
}

impl Move {
    /// Returns an instruction describing the move in words.
    ///
    /// Example: `"Turn the right face 90 degrees clockwise"`
    pub fn description(self) -> String {
        let direction = match self.modifier {
            Modifier::Clockwise => " clockwise",
            Modifier::CounterClockwise => " anticlockwise",
            Modifier::Double => "",
        };
        let degrees = self.modifier.degrees();
        format!("Turn the {} {degrees} degrees{direction}", self.face.layer_name())
    }
}
