use crate::plugin::{Flow, Port, Rdf, Vis};

use super::widget::Control;

/// Digits an integer display needs for a port whose nominal maximum is `max`.
///
/// This only picks the display width; values past `max` still show, the
/// display grows to fit them.
pub fn lcd_digits(max: f32) -> u8 {
    if max <= 9.0 { 1 } else { 2 }
}

/// Build the control widget for `port`, or `None` if the port gets no widget.
///
/// Only input control ports produce a widget. The widget type follows the
/// port's visualization class, its label is the port's display name, and
/// its tooltip is the first `comment_uri` value attached to the port.
pub fn setup_widget<R: Rdf + ?Sized>(port: &Port, comment_uri: &R::Node, rdf: &R) -> Option<Control> {
    let Port::Control(port) = port else {
        return None;
    };
    if port.info.flow != Flow::Input {
        return None;
    }

    let mut control = match port.vis {
        Vis::None => Control::knob(),
        Vis::Integer => Control::lcd(lcd_digits(port.max)),
        Vis::Enumeration => Control::combo(),
        Vis::Toggled => Control::check(),
    };
    control.set_text(port.info.name.as_str());

    // Only the first comment is used; the node list is dropped with `props`.
    let props = rdf.port_value(port.info.index, comment_uri);
    if let Some(tip) = props.into_iter().next().and_then(|node| rdf.node_as_string(&node)) {
        control.top_widget_mut().set_tool_tip(tip);
    }

    Some(control)
}
