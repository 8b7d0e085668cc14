use crate::models::product::Product;

const PRICE_UNAVAILABLE: &str = "N/A";

/// Renders one catalog entry as an HTML list item. Field values are embedded
/// verbatim.
pub fn render_product_item(domain: &str, product: &Product) -> String {
    let price = product.price
        .as_ref()
        .and_then(|p| p.display_amount())
        .map(|amount| amount.to_string())
        .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string());

    format!(
        "\n<li>\n    <a href=\"https://{domain}/product/{slug}\" class=\"text-blue-600 underline\">{title}</a>\n    <p class=\"text-sm\">{description}</p>\n    <img src=\"{image}\" alt=\"{title}\" class=\"w-24 h-24\">\n    <p class=\"text-sm\">Precio: ${price}</p>\n</li>",
        domain = domain,
        slug = product.slug,
        title = product.title,
        description = product.description_short,
        image = product.image_default,
        price = price
    )
}

/// Builds the system message for a storefront: the sales-assistant
/// instructions wrapped around the rendered catalog. Products are rendered in
/// the order given; nothing is sorted.
pub fn build_system_prompt(domain: &str, products: &[Product]) -> String {
    let items = products
        .iter()
        .map(|product| render_product_item(domain, product))
        .collect::<Vec<_>>()
        .join("");

    format!(
        "\nEres un asistente de ventas para la tienda \"{domain}\". Los productos disponibles están organizados en esta lista HTML en list-decimal brinda todo el html del producto o los productos consultados:\n<ol class=\"list-decimal ml-4\">{items}</ol>\nResponde preguntas específicas sobre los productos en un formato breve. Si te preguntan por algún producto, incluye el enlace y la imagen correspondiente. Sé claro y respetuoso al responder a cualquier mensaje ofensivo.\n   Los links encieralos en un boton para hacer click <a> y las imagenes en <img>",
        domain = domain,
        items = items
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Price;

    fn product(slug: &str, title: &str, price: Option<Price>) -> Product {
        Product {
            domain: "shop.example".into(),
            slug: slug.into(),
            title: title.into(),
            description_short: format!("{} description", title),
            image_default: format!("https://cdn/{}.png", slug),
            price,
        }
    }

    #[test]
    fn renders_link_title_description_image_and_sale_price() {
        let item = render_product_item(
            "shop.example",
            &product("red-shoes", "Red Shoes", Some(Price { sale: Some(19.99), regular: Some(25.0) }))
        );

        assert!(item.contains("<a href=\"https://shop.example/product/red-shoes\""));
        assert!(item.contains(">Red Shoes</a>"));
        assert!(item.contains("<p class=\"text-sm\">Red Shoes description</p>"));
        assert!(item.contains("<img src=\"https://cdn/red-shoes.png\" alt=\"Red Shoes\""));
        assert!(item.contains("Precio: $19.99</p>"));
    }

    #[test]
    fn price_falls_back_to_regular_then_na() {
        let regular_only = render_product_item(
            "shop.example",
            &product("a", "A", Some(Price { sale: None, regular: Some(20.0) }))
        );
        assert!(regular_only.contains("Precio: $20</p>"));

        let neither = render_product_item(
            "shop.example",
            &product("b", "B", Some(Price::default()))
        );
        assert!(neither.contains("Precio: $N/A</p>"));

        let no_price_object = render_product_item("shop.example", &product("c", "C", None));
        assert!(no_price_object.contains("Precio: $N/A</p>"));
    }

    #[test]
    fn keeps_store_order_with_one_item_per_product() {
        let products = vec![
            product("zeta", "Zeta", None),
            product("alpha", "Alpha", None),
            product("mid", "Mid", None)
        ];

        let prompt = build_system_prompt("shop.example", &products);

        assert_eq!(prompt.matches("<li>").count(), 3);
        let zeta = prompt.find("/product/zeta").unwrap();
        let alpha = prompt.find("/product/alpha").unwrap();
        let mid = prompt.find("/product/mid").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }

    #[test]
    fn template_names_the_store_and_wraps_an_ordered_list() {
        let prompt = build_system_prompt("shop.example", &[product("a", "A", None)]);

        assert!(prompt.contains("la tienda \"shop.example\""));
        assert!(prompt.contains("<ol class=\"list-decimal ml-4\">\n<li>"));
        assert!(prompt.contains("</li></ol>"));
        assert!(prompt.ends_with("las imagenes en <img>"));
    }

    #[test]
    fn is_deterministic() {
        let products = vec![
            product("a", "A", Some(Price { sale: Some(1.5), regular: None })),
            product("b", "B", None)
        ];

        assert_eq!(
            build_system_prompt("shop.example", &products),
            build_system_prompt("shop.example", &products)
        );
    }
}
