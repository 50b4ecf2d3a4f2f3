use serde::{Deserialize, Serialize};

/// A recipe row as stored in the recipe table.
///
/// Field names follow the table's column names on the wire, so the JSON
/// body is `{ name, description, recipeIngredientParts, recipeInstructions }`.
/// The free-text columns are nullable in the source dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recipe_ingredient_parts: Option<String>,
    #[serde(default)]
    pub recipe_instructions: Option<String>,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        ingredients: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            recipe_ingredient_parts: Some(ingredients.into()),
            recipe_instructions: Some(instructions.into()),
        }
    }

    /// Ingredient text, empty when the column is NULL
    pub fn ingredient_text(&self) -> &str {
        self.recipe_ingredient_parts.as_deref().unwrap_or_default()
    }

    /// Instruction text, empty when the column is NULL
    pub fn instruction_text(&self) -> &str {
        self.recipe_instructions.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_wire_names() {
        let recipe = Recipe::new("Shakshuka", "Eggs in sauce", "eggs, tomato", "Simmer.");
        let value = serde_json::to_value(&recipe).unwrap();

        assert_eq!(value["name"], "Shakshuka");
        assert_eq!(value["recipeIngredientParts"], "eggs, tomato");
        assert_eq!(value["recipeInstructions"], "Simmer.");
        assert!(value.get("recipe_ingredient_parts").is_none());
    }

    #[test]
    fn test_null_columns_read_as_empty() {
        let recipe: Recipe = serde_json::from_str(r#"{"name":"Toast","description":null}"#).unwrap();
        assert_eq!(recipe.ingredient_text(), "");
        assert_eq!(recipe.instruction_text(), "");
    }
}
