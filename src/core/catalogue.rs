//! ISO/IEC 27001:2022 checklist catalogue.
//!
//! Mandatory clauses (4–10) are grouped as section → group → item, Annex A
//! controls as section → item. The catalogue is built once and shared; ids are
//! unique and each item carries its category explicitly.

use crate::domain::model::{Category, ChecklistItem, ItemId};
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Group {
    pub title: Option<&'static str>,
    pub items: Vec<ChecklistItem>,
}

impl Group {
    pub fn titled(title: &'static str, items: Vec<ChecklistItem>) -> Self {
        Self {
            title: Some(title),
            items,
        }
    }

    pub fn untitled(items: Vec<ChecklistItem>) -> Self {
        Self { title: None, items }
    }
}

#[derive(Debug, Clone)]
pub struct Section {
    pub title: &'static str,
    pub category: Category,
    pub groups: Vec<Group>,
}

impl Section {
    pub fn new(title: &'static str, category: Category, groups: Vec<Group>) -> Self {
        Self {
            title,
            category,
            groups,
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.groups.iter().flat_map(|group| group.items.iter())
    }
}

#[derive(Debug, Clone)]
pub struct Catalogue {
    sections: Vec<Section>,
    index: HashMap<&'static str, (usize, usize, usize)>,
}

impl Catalogue {
    /// Builds a catalogue from sections in display order. Later duplicates of an id are
    /// ignored by lookups; the bundled catalogue has none.
    pub fn new(sections: Vec<Section>) -> Self {
        let mut index = HashMap::new();
        for (s, section) in sections.iter().enumerate() {
            for (g, group) in section.groups.iter().enumerate() {
                for (i, item) in group.items.iter().enumerate() {
                    index.entry(item.id).or_insert((s, g, i));
                }
            }
        }
        Self { sections, index }
    }

    pub fn iso27001() -> &'static Catalogue {
        static CATALOGUE: OnceLock<Catalogue> = OnceLock::new();
        CATALOGUE.get_or_init(|| {
            let mut sections = mandatory_sections();
            sections.extend(annex_sections());
            Catalogue::new(sections)
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn sections_in(&self, category: Category) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .filter(move |section| section.category == category)
    }

    pub fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.sections.iter().flat_map(Section::items)
    }

    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &ChecklistItem> {
        self.sections_in(category).flat_map(Section::items)
    }

    pub fn get(&self, id: &ItemId) -> Option<&ChecklistItem> {
        let &(s, g, i) = self.index.get(id.as_str())?;
        Some(&self.sections[s].groups[g].items[i])
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id.as_str())
    }

    pub fn category_of(&self, id: &ItemId) -> Option<Category> {
        self.get(id).map(|item| item.category)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn clause(id: &'static str, description: &'static str) -> ChecklistItem {
    ChecklistItem {
        id,
        description,
        category: Category::MandatoryClause,
    }
}

fn control(id: &'static str, description: &'static str) -> ChecklistItem {
    ChecklistItem {
        id,
        description,
        category: Category::AnnexControl,
    }
}

fn mandatory_sections() -> Vec<Section> {
    vec![
        Section::new(
            "4 Contexto de la organización",
            Category::MandatoryClause,
            vec![
                Group::titled(
                    "4.1 Contexto organizacional",
                    vec![
                        clause("4.1", "Determinar los objetivos del SGSI de la organización y cualquier cuestión que pueda comprometer su efectividad"),
                    ],
                ),
                Group::titled(
                    "4.2 Partes interesadas",
                    vec![
                        clause("4.2a", "Identificar las partes interesadas incluyendo leyes aplicables, regulaciones, contratos, etc."),
                        clause("4.2b", "Determinar sus requisitos relevantes al respecto de la seguridad de la información y sus obligaciones"),
                    ],
                ),
                Group::titled(
                    "4.3 Alcance del SGSI",
                    vec![
                        clause("4.3", "Determinar y documentar el alcance del SGSI"),
                    ],
                ),
                Group::titled(
                    "4.4 SGSI",
                    vec![
                        clause("4.4", "Establecer, implementar, mantener y mejorar continuamente un SGSI de conformidad con la norma"),
                    ],
                ),
            ],
        ),
        Section::new(
            "5 Liderazgo",
            Category::MandatoryClause,
            vec![
                Group::titled(
                    "5.1 Liderazgo & compromiso",
                    vec![
                        clause("5.1", "La alta dirección debe demostrar liderazgo & compromiso en relación con el SGSI"),
                    ],
                ),
                Group::titled(
                    "5.2 Política",
                    vec![
                        clause("5.2", "Establecer la política de seguridad de la información"),
                    ],
                ),
                Group::titled(
                    "5.3 Roles, responsabilidades & autoridades en la organización",
                    vec![
                        clause("5.3", "Asignar y comunicar los roles & responsabilidades de la seguridad de la información"),
                    ],
                ),
            ],
        ),
        Section::new(
            "6 Planificación",
            Category::MandatoryClause,
            vec![
                Group::titled(
                    "6.1 Acciones para tratar con los riesgos & oportunidades",
                    vec![
                        clause("6.1.1", "Diseñar / planificar el SGSI para satisfacer los requisitos, tratando con los riesgos & oportunidades"),
                        clause("6.1.2", "Definir y aplicar un proceso de apreciación de riesgos de seguridad de la información"),
                        clause("6.1.3", "Documentar y aplicar un proceso de tratamiento de riesgos de seguridad de la información"),
                    ],
                ),
                Group::titled(
                    "6.2 Objetivos & planes de seguridad de la información",
                    vec![
                        clause("6.2", "Establecer y documentar los objetivos y planes de seguridad de la información"),
                    ],
                ),
                Group::titled(
                    "6.3 Planificación de cambios",
                    vec![
                        clause("6.3", "Los cambios sustanciales al SGSI deben ser llevados a cabo de manera planificada"),
                    ],
                ),
            ],
        ),
        Section::new(
            "7 Soporte",
            Category::MandatoryClause,
            vec![
                Group::titled(
                    "7.1 Recursos",
                    vec![
                        clause("7.1", "Determinar y proporcionar los recursos necesarios para el SGSI"),
                    ],
                ),
                Group::titled(
                    "7.2 Competencias",
                    vec![
                        clause("7.2", "Determinar, documentar y poner a disposición las competencias necesarias"),
                    ],
                ),
                Group::titled(
                    "7.3 Concientización",
                    vec![
                        clause("7.3", "Establecer un programa de concientización en seguridad"),
                    ],
                ),
                Group::titled(
                    "7.4 Comunicación",
                    vec![
                        clause("7.4", "Determinar la necesidad para las comunicaciones internas y externas relevantes al SGSI"),
                    ],
                ),
                Group::titled(
                    "7.5 Información documentada",
                    vec![
                        clause("7.5.1", "Proveer la documentación requerida por la norma así como la requerida por la organización"),
                        clause("7.5.2", "Proveer títulos, autores, etc para la documentación, adecuar el formato consistentemente, revisarlos & aprobarlos"),
                        clause("7.5.3", "Controlar la documentación adecuadamente"),
                    ],
                ),
            ],
        ),
        Section::new(
            "8 Operación",
            Category::MandatoryClause,
            vec![
                Group::titled(
                    "8.1 Planificación y control operacional",
                    vec![
                        clause("8.1", "Planificar, implementar, controlar & documentar el proceso del SGSI para gestionar los riesgos (i.e. un plan de tratamiento de riesgos)"),
                    ],
                ),
                Group::titled(
                    "8.2 Apreciación del riesgo de seguridad de la información",
                    vec![
                        clause("8.2", "(Re)hacer la apreciación & documentar los riesgos de seguridad de la información en forma regular & ante cambios o modificaciones"),
                    ],
                ),
                Group::titled(
                    "8.3 Tratamiento del riesgo de seguridad de la información",
                    vec![
                        clause("8.3", "Implementar el plan de tratamiento de riesgos (tratar los riesgos!) y documentar los resultados"),
                    ],
                ),
            ],
        ),
        Section::new(
            "9 Evaluación del desempeño",
            Category::MandatoryClause,
            vec![
                Group::titled(
                    "9.1 Seguimiento, medición, análisis y evaluación",
                    vec![
                        clause("9.1", "Hacer seguimiento, medir, analizar y evaluar el SGSI y los controles"),
                    ],
                ),
                Group::titled(
                    "9.2 Auditoría interna",
                    vec![
                        clause("9.2", "Planificar y llevar a cabo auditorias internas del SGSI"),
                    ],
                ),
                Group::titled(
                    "9.3 Revisión por la dirección",
                    vec![
                        clause("9.3", "Emprender revisiones por la dirección del SGSI regularmente"),
                    ],
                ),
            ],
        ),
        Section::new(
            "10 Mejora",
            Category::MandatoryClause,
            vec![
                Group::titled(
                    "10.1 Mejora continua",
                    vec![
                        clause("10.1", "Mejorar continuamente el SGSI"),
                    ],
                ),
                Group::titled(
                    "10.2 No conformidad y acciones correctivas",
                    vec![
                        clause("10.2", "Identificar, corregir y llevar a cabo acciones para prevenir la recurrencia de no conformidades, documentando las acciones"),
                    ],
                ),
            ],
        ),
    ]
}

fn annex_sections() -> Vec<Section> {
    vec![
        Section::new(
            "A5 Controles organizacionales",
            Category::AnnexControl,
            vec![Group::untitled(vec![
                control("A.5.1", "Políticas para la seguridad de la información"),
                control("A.5.2", "Roles y responsabilidades en la seguridad de la información"),
                control("A.5.3", "Segregación de tareas"),
                control("A.5.4", "Responsabilidades de gestión"),
                control("A.5.5", "Contacto con las autoridades"),
                control("A.5.6", "Contacto con grupos de interés especial"),
                control("A.5.7", "Inteligencia de amenazas"),
                control("A.5.8", "Seguridad de la información en la gestión de proyectos"),
                control("A.5.9", "Inventario de activos de información y otros asociados a la misma"),
                control("A.5.10", "Uso aceptable de activos de información y otros asociados a la misma"),
                control("A.5.11", "Devolución de activos"),
                control("A.5.12", "Clasificación de la información"),
                control("A.5.13", "Etiquetado de la información"),
                control("A.5.14", "Intercambio de la información"),
                control("A.5.15", "Control de Acceso"),
                control("A.5.16", "Gestión de la identidad"),
                control("A.5.17", "Información de autenticación"),
                control("A.5.18", "Derechos de acceso"),
                control("A.5.19", "Seguridad de la información en la relación con proveedores"),
                control("A.5.20", "Requisitos de seguridad de la información en contratos con terceros"),
                control("A.5.21", "Gestión de la seguridad de la información en la cadena de suministro de las TIC (Tecnologías de Información y Comunicación)"),
                control("A.5.22", "Gestión del cambio, revisión y monitoreo de los servicios del proveedor o suministrador"),
                control("A.5.23", "Seguridad de la información para el uso de servicios en la nube (cloud)"),
                control("A.5.24", "Planeamiento y preparación de la gestión de incidentes de seguridad de la información"),
                control("A.5.25", "Evaluación y decisión en los eventos de seguridad de la información"),
                control("A.5.26", "Respuesta a los incidentes de seguridad de la información"),
                control("A.5.27", "Aprendizaje sobre los incidentes de seguridad de la información"),
                control("A.5.28", "Recolección de evidencia"),
                control("A.5.29", "Seguridad de la información durante interrupciones"),
                control("A.5.30", "Preparación de las TIC para la continuidad de negocio"),
                control("A.5.31", "Requisitos legales, estatutarios, regulatorios y contractuales"),
                control("A.5.32", "Derechos de propiedad intelectual"),
                control("A.5.33", "Protección de registros"),
                control("A.5.34", "Privacidad y protección de la PII (Información Identificable Personal)"),
                control("A.5.35", "Revisión independiente de la seguridad de la información"),
                control("A.5.36", "Cumplimiento con las políticas, reglas y normas de la seguridad de la información"),
                control("A.5.37", "Procedimientos operacionales documentados"),
            ])],
        ),
        Section::new(
            "A6 Controles personales",
            Category::AnnexControl,
            vec![Group::untitled(vec![
                control("A.6.1", "Revisión de antecedentes"),
                control("A.6.2", "Términos y condiciones de empleo"),
                control("A.6.3", "Concientización, educación y entrenamiento en seguridad de la información"),
                control("A.6.4", "Proceso disciplinario"),
                control("A.6.5", "Responsabilidades luego de la finalización o cambio de empleo"),
                control("A.6.6", "Acuerdos de confidencialidad o no revelación"),
                control("A.6.7", "Trabajo remoto"),
                control("A.6.8", "Reportes de eventos de seguridad de la información"),
            ])],
        ),
        Section::new(
            "A7 Controles físicos",
            Category::AnnexControl,
            vec![Group::untitled(vec![
                control("A.7.1", "Perímetros de seguridad física"),
                control("A.7.2", "Entrada física"),
                control("A.7.3", "Seguridad de oficinas, despachos e instalaciones"),
                control("A.7.4", "Supervisión de la seguridad física"),
                control("A.7.5", "Protección contra amenazas físicas y ambientales"),
                control("A.7.6", "Trabajo en áreas seguras"),
                control("A.7.7", "Escritorio y pantalla limpios"),
                control("A.7.8", "Emplazamiento y protección de equipos"),
                control("A.7.9", "Seguridad de activos fuera de las instalaciones"),
                control("A.7.10", "Medios de almacenamiento"),
                control("A.7.11", "Servicios de suministro"),
                control("A.7.12", "Seguridad del cableado"),
                control("A.7.13", "Mantenimiento de equipos"),
                control("A.7.14", "Eliminación o re utilización segura de equipos"),
            ])],
        ),
        Section::new(
            "A8 Controles tecnológicos",
            Category::AnnexControl,
            vec![Group::untitled(vec![
                control("A.8.1", "Dispositivos terminales de usuario"),
                control("A.8.2", "Derechos de acceso privilegiado"),
                control("A.8.3", "Restricción de acceso a la información"),
                control("A.8.4", "Acceso al código fuente"),
                control("A.8.5", "Autenticación segura"),
                control("A.8.6", "Gestión de la capacidad"),
                control("A.8.7", "Protección contra código malicioso (malware)"),
                control("A.8.8", "Gestión de vulnerabilidades técnicas"),
                control("A.8.9", "Gestión de la configuración"),
                control("A.8.10", "Borrado de información"),
                control("A.8.11", "Enmascarado de datos"),
                control("A.8.12", "Prevención de filtración de datos"),
                control("A.8.13", "Respaldo de información"),
                control("A.8.14", "Redundancia de las instalaciones de procesamiento de información"),
                control("A.8.15", "Registración"),
                control("A.8.16", "Actividades de supervisión"),
                control("A.8.17", "Sincronización de reloj (clock)"),
                control("A.8.18", "Uso de programas utilitarios privilegiados"),
                control("A.8.19", "Instalación de software en sistemas operacionales"),
                control("A.8.20", "Seguridad en redes"),
                control("A.8.21", "Seguridad de servicios de red"),
                control("A.8.22", "Segregación de redes"),
                control("A.8.23", "Filtrado web"),
                control("A.8.24", "Uso de criptografía"),
                control("A.8.25", "Desarrollo seguro del ciclo de vida"),
                control("A.8.26", "Requerimientos de seguridad en aplicaciones"),
                control("A.8.27", "Principios de arquitectura de sistemas e ingeniería seguras"),
                control("A.8.28", "Generación de código seguro"),
                control("A.8.29", "Prueba segura en el desarrollo y aceptación"),
                control("A.8.30", "Desarrollo tercerizado"),
                control("A.8.31", "Separación de entornos de desarrollo, prueba y producción"),
                control("A.8.32", "Gestión de cambios"),
                control("A.8.33", "Información de prueba"),
                control("A.8.34", "Protección de sistemas de información durante pruebas de auditoría"),
            ])],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn bundled_catalogue_has_every_clause_and_control() {
        let catalogue = Catalogue::iso27001();
        assert_eq!(catalogue.items_in(Category::MandatoryClause).count(), 28);
        assert_eq!(catalogue.items_in(Category::AnnexControl).count(), 93);
        assert_eq!(catalogue.len(), 121);
    }

    #[test]
    fn ids_are_unique() {
        let catalogue = Catalogue::iso27001();
        let mut seen = HashSet::new();
        for item in catalogue.items() {
            assert!(seen.insert(item.id), "duplicate id {}", item.id);
        }
    }

    #[test]
    fn category_tags_agree_with_numbering() {
        for item in Catalogue::iso27001().items() {
            match item.category {
                Category::AnnexControl => assert!(item.id.starts_with("A.")),
                Category::MandatoryClause => assert!(!item.id.starts_with("A.")),
            }
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalogue = Catalogue::iso27001();
        let item = catalogue.get(&ItemId::from("A.8.24")).unwrap();
        assert_eq!(item.description, "Uso de criptografía");
        assert_eq!(
            catalogue.category_of(&ItemId::from("4.2b")),
            Some(Category::MandatoryClause)
        );
        assert!(!catalogue.contains(&ItemId::from("11.1")));
    }

    #[test]
    fn sections_keep_display_order() {
        let titles: Vec<_> = Catalogue::iso27001()
            .sections_in(Category::AnnexControl)
            .map(|section| section.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "A5 Controles organizacionales",
                "A6 Controles personales",
                "A7 Controles físicos",
                "A8 Controles tecnológicos",
            ]
        );
    }
}
