//! Resource Registry
//!
//! Tracks the mapping between components and the template/style resources
//! they depend on, in both directions. The reverse maps are what let "a
//! style file changed on disk" translate into "these components must be
//! re-analyzed".

use indexmap::{IndexMap, IndexSet};
use std::rc::Rc;

use crate::ngtsc::diagnostics::DiagnosticNode;
use crate::ngtsc::file_system::AbsoluteFsPath;
use ts::{Declaration, DeclarationId};

/// A template or style artifact used by a component. A `None` path means
/// the resource is inline in the component source.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub path: Option<AbsoluteFsPath>,
    /// The expression the resource was resolved from (e.g. the
    /// `templateUrl` string), for diagnostics.
    pub expression: DiagnosticNode,
}

impl Resource {
    pub fn external(path: AbsoluteFsPath, expression: DiagnosticNode) -> Self {
        Resource {
            path: Some(path),
            expression,
        }
    }

    pub fn inline(expression: DiagnosticNode) -> Self {
        Resource {
            path: None,
            expression,
        }
    }

    pub fn is_external(&self) -> bool {
        self.path.is_some()
    }
}

/// The full set of resources of one component: exactly one template and any
/// number of styles.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentResources {
    pub template: Resource,
    pub styles: Vec<Resource>,
}

#[derive(Default)]
pub struct ResourceRegistry {
    templates: IndexMap<DeclarationId, Resource>,
    styles: IndexMap<DeclarationId, Vec<Resource>>,
    components: IndexMap<DeclarationId, Rc<Declaration>>,
    external_template_to_components: IndexMap<AbsoluteFsPath, IndexSet<DeclarationId>>,
    external_style_to_components: IndexMap<AbsoluteFsPath, IndexSet<DeclarationId>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The aggregate mutation entry point.
    pub fn register_resources(&mut self, resources: &ComponentResources, component: &Rc<Declaration>) {
        self.register_template(resources.template.clone(), component);
        for style in &resources.styles {
            self.register_style(style.clone(), component);
        }
    }

    pub fn register_template(&mut self, template: Resource, component: &Rc<Declaration>) {
        let id = component.id();
        self.components.insert(id.clone(), Rc::clone(component));

        // Re-registration fully replaces the previous mapping.
        if let Some(previous) = self.templates.insert(id.clone(), template.clone()) {
            if let Some(old_path) = previous.path {
                if let Some(owners) = self.external_template_to_components.get_mut(&old_path) {
                    owners.shift_remove(&id);
                }
            }
        }
        if let Some(path) = &template.path {
            self.external_template_to_components
                .entry(path.clone())
                .or_default()
                .insert(id);
        }
    }

    pub fn register_style(&mut self, style: Resource, component: &Rc<Declaration>) {
        let id = component.id();
        self.components.insert(id.clone(), Rc::clone(component));
        if let Some(path) = &style.path {
            self.external_style_to_components
                .entry(path.clone())
                .or_default()
                .insert(id.clone());
        }
        self.styles.entry(id).or_default().push(style);
    }

    pub fn get_template(&self, component: &DeclarationId) -> Option<&Resource> {
        self.templates.get(component)
    }

    pub fn get_styles(&self, component: &DeclarationId) -> &[Resource] {
        self.styles
            .get(component)
            .map(|styles| styles.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_components_with_template(&self, path: &AbsoluteFsPath) -> Vec<Rc<Declaration>> {
        self.owners_of(&self.external_template_to_components, path)
    }

    pub fn get_components_with_style(&self, path: &AbsoluteFsPath) -> Vec<Rc<Declaration>> {
        self.owners_of(&self.external_style_to_components, path)
    }

    /// Every component whose template or any style lives at `path`.
    pub fn get_components_with_resource(&self, path: &AbsoluteFsPath) -> Vec<Rc<Declaration>> {
        let mut components = self.get_components_with_template(path);
        for c in self.get_components_with_style(path) {
            if !components.iter().any(|existing| existing.id() == c.id()) {
                components.push(c);
            }
        }
        components
    }

    fn owners_of(
        &self,
        map: &IndexMap<AbsoluteFsPath, IndexSet<DeclarationId>>,
        path: &AbsoluteFsPath,
    ) -> Vec<Rc<Declaration>> {
        map.get(path)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.components.get(id).map(Rc::clone))
                    .collect()
            })
            .unwrap_or_default()
    }
}
