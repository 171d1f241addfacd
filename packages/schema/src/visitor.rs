use crate::model::*;

/// Visitor pattern for traversing a schema immutably
///
/// Default implementations walk pages → sections → components, then the
/// info queue. Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_schema(&mut self, schema: &Schema) {
        walk_schema(self, schema);
    }

    fn visit_page(&mut self, page: &Page) {
        walk_page(self, page);
    }

    fn visit_section(&mut self, section: &Section) {
        walk_section(self, section);
    }

    fn visit_component(&mut self, _component: &Component) {
        // Leaf node, no children to walk
    }

    fn visit_info_item(&mut self, _item: &InfoItem) {
        // Leaf node, no children to walk
    }
}

/// Mutable visitor for transforming a schema in place
pub trait VisitorMut: Sized {
    fn visit_schema_mut(&mut self, schema: &mut Schema) {
        walk_schema_mut(self, schema);
    }

    fn visit_page_mut(&mut self, page: &mut Page) {
        walk_page_mut(self, page);
    }

    fn visit_section_mut(&mut self, section: &mut Section) {
        walk_section_mut(self, section);
    }

    fn visit_component_mut(&mut self, _component: &mut Component) {
        // Leaf node, no children to walk
    }
}

pub fn walk_schema<V: Visitor>(visitor: &mut V, schema: &Schema) {
    for page in &schema.pages {
        visitor.visit_page(page);
    }
    for item in &schema.info_queue {
        visitor.visit_info_item(item);
    }
}

pub fn walk_page<V: Visitor>(visitor: &mut V, page: &Page) {
    for section in &page.sections {
        visitor.visit_section(section);
    }
}

pub fn walk_section<V: Visitor>(visitor: &mut V, section: &Section) {
    for component in &section.components {
        visitor.visit_component(component);
    }
}

pub fn walk_schema_mut<V: VisitorMut>(visitor: &mut V, schema: &mut Schema) {
    for page in &mut schema.pages {
        visitor.visit_page_mut(page);
    }
}

pub fn walk_page_mut<V: VisitorMut>(visitor: &mut V, page: &mut Page) {
    for section in &mut page.sections {
        visitor.visit_section_mut(section);
    }
}

pub fn walk_section_mut<V: VisitorMut>(visitor: &mut V, section: &mut Section) {
    for component in &mut section.components {
        visitor.visit_component_mut(component);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct RoleCollector {
        roles: Vec<String>,
        info: usize,
    }

    impl Visitor for RoleCollector {
        fn visit_component(&mut self, component: &Component) {
            self.roles.push(component.role.clone());
        }

        fn visit_info_item(&mut self, _item: &InfoItem) {
            self.info += 1;
        }
    }

    struct Restyle;

    impl VisitorMut for Restyle {
        fn visit_component_mut(&mut self, component: &mut Component) {
            component.style.insert("emphasis".to_string(), json!("highlight"));
        }
    }

    fn schema() -> Schema {
        serde_json::from_value(json!({
            "pages": [
                {"id": "a", "sections": [{"id": "s1", "role": "main", "components": [
                    {"id": "c1", "role": "TrendChart"},
                    {"id": "c2", "role": "AlertTable"}
                ]}]},
                {"id": "b", "sections": [{"id": "s2", "role": "header", "components": [
                    {"id": "c3", "role": "KPIOverview"}
                ]}]}
            ],
            "infoQueue": [{"id": "i1"}, {"id": "i2"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_visitor_walks_in_document_order() {
        let mut collector = RoleCollector {
            roles: vec![],
            info: 0,
        };
        collector.visit_schema(&schema());
        assert_eq!(collector.roles, vec!["TrendChart", "AlertTable", "KPIOverview"]);
        assert_eq!(collector.info, 2);
    }

    #[test]
    fn test_visitor_mut_reaches_every_component() {
        let mut schema = schema();
        Restyle.visit_schema_mut(&mut schema);
        assert!(schema
            .components()
            .all(|c| c.style.get("emphasis") == Some(&json!("highlight"))));
    }
}
