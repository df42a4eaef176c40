use crate::{
    api::{Connection, LinkLabel, LinkType},
    model::{Bounds, Point, Value},
    translator::{Category, NormalizedShape, Translator},
};
use log::warn;

const LABEL_WIDTH: f64 = 100.0;
const LABEL_HEIGHT: f64 = 50.0;

impl Translator {
    /// Drawable geometry for every link with at least two polyline points.
    /// A dangling endpoint name degrades that one connection to a `None`
    /// endpoint instead of failing the pass.
    pub fn connections(&self) -> Vec<Connection> {
        self.process
            .get("Links")
            .and_then(|links| links.get("Link"))
            .map(Value::as_sequence)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|link| self.connection(link))
            .collect()
    }

    fn connection(&self, link: &Value) -> Option<Connection> {
        let points: Vec<Point> = link
            .get("Points")
            .and_then(|points| points.get("Point"))
            .map(Value::as_sequence)
            .unwrap_or_default()
            .into_iter()
            .map(|point| {
                Point::new(
                    point.number("x").unwrap_or(0.0),
                    point.number("y").unwrap_or(0.0),
                )
            })
            .collect();
        if points.len() < 2 {
            return None;
        }

        let source = self.endpoint(link, "Source");
        let target = self.endpoint(link, "Target");

        // Declared type yields to the diamond marker when the source shape
        // has its default flag off and is not itself a connector.
        let declared = LinkType::from_raw(link.attr("type"));
        let link_type = match source {
            Some(shape)
                if shape.data.attr("default") == Some("false")
                    && shape.category != Category::Connector =>
            {
                LinkType::Diamond
            }
            _ => declared,
        };

        let (label, icon) = if link_type.is_decorated() {
            let text = self.resources.link_label(link.attr("name").unwrap_or_default());
            (
                Some(LinkLabel {
                    text,
                    bounds: label_bounds(points[0], points[1]),
                }),
                Some(self.icon_path(&self.resources.link_icon(&link_type.to_string()))),
            )
        } else {
            (None, None)
        };

        Some(Connection {
            source: source.map(|shape| shape.shape_id.clone()),
            target: target.map(|shape| shape.shape_id.clone()),
            points,
            split: link_type == LinkType::DecisionSplit,
            link_type,
            label,
            icon,
        })
    }

    fn endpoint<'a>(&'a self, link: &Value, side: &str) -> Option<&'a NormalizedShape> {
        let name = link.get(side).and_then(Value::text)?;
        let found = self.index.find(name);
        if found.is_none() {
            warn!(r#"link {side} "{name}" does not resolve to a shape"#);
        }
        found
    }
}

// Layout heuristic anchored on the upper/left point of the first segment.
fn label_bounds(p1: Point, p2: Point) -> Bounds {
    let (x, y) = if p1.x == p2.x {
        let y = if p1.y < p2.y { p1.y + 20.0 } else { p2.y - 20.0 };
        (p1.x + 10.0, y)
    } else {
        let x = if p1.x < p2.x { p1.x + 10.0 } else { p2.x - 90.0 };
        (x, p1.y - 20.0)
    };
    Bounds {
        x,
        y,
        width: LABEL_WIDTH,
        height: LABEL_HEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::tests::load;

    fn linked(link: &str) -> String {
        format!(
            r#"<Process>
                 <Workstep id="w1" name="A"/>
                 <Workstep id="w2" name="B"/>
                 <Connector id="c1" name="Choice"><ConnectorType>DECISIONSPLIT</ConnectorType></Connector>
                 <Links>{link}</Links>
               </Process>"#
        )
    }

    #[test]
    fn vertical_descending_label() {
        let t = load(&linked(
            r#"<Link name="L" type="DECISIONSPLIT">
                 <Source>A</Source><Target>B</Target>
                 <Points><Point x="10" y="10"/><Point x="10" y="50"/></Points>
               </Link>"#,
        ));
        let bounds = t.connections()[0].label.as_ref().unwrap().bounds;
        assert_eq!((bounds.x, bounds.y), (20.0, 30.0));
        assert_eq!((bounds.width, bounds.height), (100.0, 50.0));
    }

    #[test]
    fn vertical_ascending_label() {
        let t = load(&linked(
            r#"<Link name="L" type="DECISIONSPLIT">
                 <Source>A</Source><Target>B</Target>
                 <Points><Point x="10" y="50"/><Point x="10" y="10"/></Points>
               </Link>"#,
        ));
        let bounds = t.connections()[0].label.as_ref().unwrap().bounds;
        assert_eq!((bounds.x, bounds.y), (20.0, -10.0));
    }

    #[test]
    fn horizontal_rightward_label() {
        let t = load(&linked(
            r#"<Link name="L" type="TIMEOUT">
                 <Source>A</Source><Target>B</Target>
                 <Points><Point x="10" y="10"/><Point x="50" y="10"/></Points>
               </Link>"#,
        ));
        let bounds = t.connections()[0].label.as_ref().unwrap().bounds;
        assert_eq!((bounds.x, bounds.y), (20.0, -10.0));
    }

    #[test]
    fn horizontal_leftward_label() {
        let t = load(&linked(
            r#"<Link name="L" type="TIMEOUT">
                 <Source>A</Source><Target>B</Target>
                 <Points><Point x="50" y="10"/><Point x="10" y="10"/></Points>
               </Link>"#,
        ));
        let bounds = t.connections()[0].label.as_ref().unwrap().bounds;
        assert_eq!(bounds.x, -80.0);
    }

    #[test]
    fn plain_flow_is_undecorated() {
        let t = load(&linked(
            r#"<Link name="L">
                 <Source>A</Source><Target>B</Target>
                 <Points><Point x="0" y="0"/><Point x="40" y="0"/></Points>
               </Link>"#,
        ));
        let connection = &t.connections()[0];
        assert_eq!(connection.link_type, LinkType::Flow);
        assert!(connection.label.is_none());
        assert!(connection.icon.is_none());
        assert!(!connection.split);
    }

    #[test]
    fn split_flag_follows_decision_split() {
        let t = load(&linked(
            r#"<Link name="L" type="DECISIONSPLIT">
                 <Source>Choice</Source><Target>B</Target>
                 <Points><Point x="0" y="0"/><Point x="40" y="0"/></Points>
               </Link>"#,
        ));
        assert!(t.connections()[0].split);
    }

    #[test]
    fn default_off_source_forces_the_diamond() {
        let t = load(
            r#"<Process>
                 <Workstep id="w1" name="A" default="false"/>
                 <Workstep id="w2" name="B"/>
                 <Links>
                   <Link name="L" type="COMPENSATION">
                     <Source>A</Source><Target>B</Target>
                     <Points><Point x="0" y="0"/><Point x="40" y="0"/></Points>
                   </Link>
                 </Links>
               </Process>"#,
        );
        let connection = &t.connections()[0];
        assert_eq!(connection.link_type, LinkType::Diamond);
        assert!(connection.label.is_some());
    }

    #[test]
    fn connector_source_keeps_the_declared_type() {
        let t = load(
            r#"<Process>
                 <Workstep id="w2" name="B"/>
                 <Connector id="c1" name="Choice" default="false"/>
                 <Links>
                   <Link name="L" type="DECISIONSPLIT">
                     <Source>Choice</Source><Target>B</Target>
                     <Points><Point x="0" y="0"/><Point x="40" y="0"/></Points>
                   </Link>
                 </Links>
               </Process>"#,
        );
        assert_eq!(t.connections()[0].link_type, LinkType::DecisionSplit);
    }

    #[test]
    fn dangling_endpoint_degrades_to_none() {
        let t = load(&linked(
            r#"<Link name="L">
                 <Source>Nowhere</Source><Target>B</Target>
                 <Points><Point x="0" y="0"/><Point x="40" y="0"/></Points>
               </Link>"#,
        ));
        let connection = &t.connections()[0];
        assert!(connection.source.is_none());
        assert_eq!(connection.target.as_deref(), Some("shape_w2"));
    }

    #[test]
    fn short_links_are_skipped() {
        let t = load(&linked(
            r#"<Link name="L">
                 <Source>A</Source><Target>B</Target>
                 <Points><Point x="0" y="0"/></Points>
               </Link>"#,
        ));
        assert!(t.connections().is_empty());
    }

    #[test]
    fn endpoints_resolve_to_shape_ids() {
        let t = load(&linked(
            r#"<Link name="L">
                 <Source>A</Source><Target>Choice</Target>
                 <Points><Point x="0" y="0"/><Point x="40" y="0"/></Points>
               </Link>"#,
        ));
        let connection = &t.connections()[0];
        assert_eq!(connection.source.as_deref(), Some("shape_w1"));
        assert_eq!(connection.target.as_deref(), Some("shape_c1"));
    }
}
