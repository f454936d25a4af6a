//! Catalog facet filtering and the built-in seed catalog.

use serde::{Deserialize, Serialize};

use crate::types::{Facet, Price, Product, ProductId};

/// Bundled product images, in the order the admin image picker cycles them.
pub const BUNDLED_IMAGES: [&str; 3] = [
    "/images/polo_uniforme_simbolo.png",
    "/images/scrub_uniforme_final.png",
    "/images/profissionais_uniformizados.png",
];

/// Facet filter chosen in the catalog view.
///
/// `None` or a blank value means "any". Non-blank facets are combined with
/// logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFilter {
    pub size: Option<String>,
    pub color: Option<String>,
    pub model: Option<String>,
}

impl ProductFilter {
    /// The selected value for a facet, ignoring blanks.
    #[must_use]
    pub fn selected(&self, facet: Facet) -> Option<&str> {
        let value = match facet {
            Facet::Size => self.size.as_deref(),
            Facet::Color => self.color.as_deref(),
            Facet::Model => self.model.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Whether no facet is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Facet::ALL.iter().all(|facet| self.selected(*facet).is_none())
    }

    /// Reset every facet to "any".
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a product passes every selected facet.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        Facet::ALL.iter().all(|facet| {
            self.selected(*facet)
                .is_none_or(|value| product.offers(*facet, value))
        })
    }

    /// Products passing the filter, in catalog order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }
}

/// Distinct facet values across a catalog, for the filter menus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOptions {
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub models: Vec<String>,
}

impl FacetOptions {
    /// Collect unique values in order of first appearance.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        let collect = |facet: Facet| {
            let mut values: Vec<String> = Vec::new();
            for value in products.iter().flat_map(|p| p.facet_values(facet)) {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
            values
        };

        Self {
            sizes: collect(Facet::Size),
            colors: collect(Facet::Color),
            models: collect(Facet::Model),
        }
    }
}

/// Options chosen for a product before adding it to the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSelection {
    pub size: Option<String>,
    pub color: Option<String>,
    pub model: Option<String>,
}

impl OptionSelection {
    /// Blank values become `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let keep = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            size: keep(self.size),
            color: keep(self.color),
            model: keep(self.model),
        }
    }

    /// Starting selection when a product detail is opened.
    ///
    /// Each facet keeps the previous choice if the product offers it, falls
    /// back to the product's first value, or stays empty if the product has
    /// none.
    #[must_use]
    pub fn initial_for(product: &Product, previous: &Self) -> Self {
        let pick = |facet: Facet, prior: Option<&String>| {
            let values = product.facet_values(facet);
            prior
                .filter(|p| values.contains(*p))
                .or_else(|| values.first())
                .cloned()
        };

        Self {
            size: pick(Facet::Size, previous.size.as_ref()),
            color: pick(Facet::Color, previous.color.as_ref()),
            model: pick(Facet::Model, previous.model.as_ref()),
        }
    }
}

/// The catalog used when nothing is stored yet.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    let [polo, scrub, team] = BUNDLED_IMAGES;

    vec![
        Product {
            id: ProductId::new(1),
            name: "Camisa Polo Empresarial".to_string(),
            price: Price::from_cents(8990),
            image: polo.to_string(),
            image_url: None,
            description: "Camisa polo de alta qualidade para uniformes empresariais.".to_string(),
            sizes: strings(&["P", "M", "G", "GG"]),
            colors: strings(&["Azul", "Preto", "Branco", "Vermelho"]),
            models: strings(&["Slim", "Regular", "Tradicional"]),
            weight: None,
        },
        Product {
            id: ProductId::new(2),
            name: "Scrub Hospitalar".to_string(),
            price: Price::from_cents(12990),
            image: scrub.to_string(),
            image_url: None,
            description:
                "Uniforme hospitalar confortável e durável para profissionais da saúde."
                    .to_string(),
            sizes: strings(&["P", "M", "G", "GG"]),
            colors: strings(&["Verde", "Azul", "Branco", "Rosa"]),
            models: strings(&["Unissex", "Feminino", "Masculino"]),
            weight: None,
        },
        Product {
            id: ProductId::new(3),
            name: "Kit Uniforme Corporativo".to_string(),
            price: Price::from_cents(24990),
            image: team.to_string(),
            image_url: None,
            description: "Kit completo de uniformes para sua equipe.".to_string(),
            sizes: strings(&["P", "M", "G", "GG"]),
            colors: strings(&["Azul", "Preto", "Cinza"]),
            models: strings(&["Executivo", "Casual", "Operacional"]),
            weight: None,
        },
        Product {
            id: ProductId::new(4),
            name: "Camisa Social".to_string(),
            price: Price::from_cents(11990),
            image: polo.to_string(),
            image_url: None,
            description: "Camisa social elegante para ambientes corporativos.".to_string(),
            sizes: strings(&["P", "M", "G", "GG"]),
            colors: strings(&["Branco", "Azul Claro", "Listrado"]),
            models: strings(&["Manga Longa", "Manga Curta"]),
            weight: None,
        },
        Product {
            id: ProductId::new(5),
            name: "Jaleco Profissional".to_string(),
            price: Price::from_cents(14990),
            image: scrub.to_string(),
            image_url: None,
            description: "Jaleco profissional para área da saúde e laboratórios.".to_string(),
            sizes: strings(&["P", "M", "G", "GG"]),
            colors: strings(&["Branco", "Azul"]),
            models: strings(&["Tradicional", "Moderno"]),
            weight: None,
        },
        Product {
            id: ProductId::new(6),
            name: "Uniforme Industrial".to_string(),
            price: Price::from_cents(17990),
            image: team.to_string(),
            image_url: None,
            description: "Uniforme resistente para ambientes industriais.".to_string(),
            sizes: strings(&["P", "M", "G", "GG", "XG"]),
            colors: strings(&["Laranja", "Azul", "Cinza"]),
            models: strings(&["Com Refletivo", "Sem Refletivo"]),
            weight: None,
        },
    ]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
