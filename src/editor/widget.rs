use std::fmt;

use crate::control::ControlModel;
use crate::plugin::ScalePoint;

/// Which control widget a port is shown with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Knob,
    Lcd { digits: u8 },
    Combo,
    Check,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKind::Knob => write!(f, "knob"),
            ControlKind::Lcd { digits } => write!(f, "lcd({digits})"),
            ControlKind::Combo => write!(f, "combo"),
            ControlKind::Check => write!(f, "check"),
        }
    }
}

/// The visible root of a control; carries the tooltip.
#[derive(Debug, Clone, Default)]
pub struct TopWidget {
    tool_tip: String,
}

impl TopWidget {
    pub fn set_tool_tip(&mut self, text: impl Into<String>) {
        self.tool_tip = text.into();
    }

    pub fn tool_tip(&self) -> &str {
        &self.tool_tip
    }
}

/// A control widget, bound to a parameter model after construction.
#[derive(Debug, Clone)]
pub struct Control {
    kind: ControlKind,
    text: String,
    top: TopWidget,
    value: f32,
    min: f32,
    max: f32,
    options: Vec<ScalePoint>,
}

impl Control {
    fn with_kind(kind: ControlKind) -> Self {
        Self {
            kind,
            text: String::new(),
            top: TopWidget::default(),
            value: 0.0,
            min: 0.0,
            max: 1.0,
            options: Vec::new(),
        }
    }

    pub fn knob() -> Self {
        Self::with_kind(ControlKind::Knob)
    }

    pub fn lcd(digits: u8) -> Self {
        Self::with_kind(ControlKind::Lcd { digits })
    }

    pub fn combo() -> Self {
        Self::with_kind(ControlKind::Combo)
    }

    pub fn check() -> Self {
        Self::with_kind(ControlKind::Check)
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn top_widget(&self) -> &TopWidget {
        &self.top
    }

    pub fn top_widget_mut(&mut self) -> &mut TopWidget {
        &mut self.top
    }

    /// Combo entries, ascending by value.
    pub fn set_options(&mut self, options: Vec<ScalePoint>) {
        self.options = options;
    }

    pub fn options(&self) -> &[ScalePoint] {
        &self.options
    }

    /// Copy the current value and range from `model`.
    pub fn bind(&mut self, model: &ControlModel) {
        self.value = model.value();
        self.min = model.min();
        self.max = model.max();
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn is_checked(&self) -> bool {
        self.value > self.min
    }

    /// Index of the combo entry matching the current value.
    pub fn selected_option(&self) -> Option<usize> {
        self.options
            .iter()
            .position(|sp| (sp.value - self.value).abs() < f32::EPSILON)
    }

    /// Short human form of the bound value.
    pub fn display_value(&self) -> String {
        match self.kind {
            ControlKind::Knob => format!("{:.2}", self.value),
            ControlKind::Lcd { .. } => format!("{}", self.value.round() as i64),
            ControlKind::Combo => self
                .selected_option()
                .map(|i| self.options[i].label.clone())
                .unwrap_or_else(|| format!("{}", self.value)),
            ControlKind::Check => if self.is_checked() { "on" } else { "off" }.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::tests::control_port;
    use crate::plugin::{Port, Vis};

    #[test]
    fn constructors_set_kind() {
        assert_eq!(Control::knob().kind(), ControlKind::Knob);
        assert_eq!(Control::lcd(2).kind(), ControlKind::Lcd { digits: 2 });
        assert_eq!(Control::combo().kind(), ControlKind::Combo);
        assert_eq!(Control::check().kind(), ControlKind::Check);
        assert_eq!(ControlKind::Lcd { digits: 2 }.to_string(), "lcd(2)");
    }

    #[test]
    fn tooltip_starts_empty() {
        let mut c = Control::knob();
        assert_eq!(c.top_widget().tool_tip(), "");
        c.top_widget_mut().set_tool_tip("cutoff frequency");
        assert_eq!(c.top_widget().tool_tip(), "cutoff frequency");
    }

    #[test]
    fn bind_copies_model_state() {
        let Port::Control(mut port) = control_port(0, "order", Vis::Integer, 4.0) else {
            unreachable!()
        };
        port.default = 3.0;
        let model = ControlModel::for_port(&port);
        let mut c = Control::lcd(1);
        c.bind(&model);
        assert_eq!(c.value(), 3.0);
        assert_eq!(c.range(), (0.0, 4.0));
        assert_eq!(c.display_value(), "3");
    }

    #[test]
    fn combo_displays_option_label() {
        let mut c = Control::combo();
        c.set_options(vec![
            ScalePoint { value: 0.0, label: "Lowpass".into() },
            ScalePoint { value: 1.0, label: "Highpass".into() },
        ]);
        assert_eq!(c.selected_option(), Some(0));
        assert_eq!(c.display_value(), "Lowpass");
    }
}
