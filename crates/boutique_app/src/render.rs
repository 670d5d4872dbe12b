use std::fmt::Write;

use boutique_core::{AppViewModel, CartLineView, DetailView, ProductRowView};

/// Renders the whole storefront as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = write_view(&mut out, view);
    out
}

fn write_view(out: &mut String, view: &AppViewModel) -> std::fmt::Result {
    writeln!(out, "==== Boutique ==== cart: {}", view.cart_total_items)?;
    if let Some(notice) = &view.notice {
        writeln!(out, "* {notice}")?;
    }

    let mut chips = vec![chip("all", view.category == "all")];
    chips.extend(
        view.categories
            .iter()
            .map(|name| chip(name, *name == view.category)),
    );
    writeln!(out, "categories: {}", chips.join(" "))?;
    writeln!(
        out,
        "search: {:?}  sort: {}  page: {}",
        view.search,
        view.sort.label(),
        view.page
    )?;

    if let Some(detail) = &view.detail {
        write_detail(out, detail)?;
    } else if view.full_screen_loading {
        writeln!(out, "Loading products...")?;
    } else if let Some(error) = &view.error {
        writeln!(out, "Could not load products: {error}")?;
        writeln!(out, "(type `retry`)")?;
    } else {
        write_products(out, view)?;
    }

    write_cart(out, &view.cart_lines, view.cart_total_price)?;
    if !view.favorites.is_empty() {
        writeln!(out, "-- favorites --")?;
        for row in &view.favorites {
            write_row(out, row)?;
        }
    }
    Ok(())
}

fn chip(name: &str, selected: bool) -> String {
    if selected {
        format!("[{name}]")
    } else {
        name.to_string()
    }
}

fn write_products(out: &mut String, view: &AppViewModel) -> std::fmt::Result {
    if view.refreshing {
        writeln!(out, "Refreshing...")?;
    }
    if view.products.is_empty() {
        writeln!(out, "No products found.")?;
    }
    for row in &view.products {
        write_row(out, row)?;
    }
    if view.loading_more {
        writeln!(out, "Loading more...")?;
    } else {
        writeln!(
            out,
            "({} of {} loaded; `more` for next page)",
            view.products.len(),
            view.accumulated_count
        )?;
    }
    Ok(())
}

fn write_row(out: &mut String, row: &ProductRowView) -> std::fmt::Result {
    let heart = if row.is_favorite { "♥" } else { " " };
    write!(
        out,
        "{heart} #{:<4} {:<40} {:>8.2}  ★{:.1}  {}",
        row.product_id, row.title, row.price, row.rate, row.category
    )?;
    if let Some(quantity) = row.in_cart {
        write!(out, "  (in cart: {quantity})")?;
    }
    writeln!(out)
}

fn write_detail(out: &mut String, detail: &DetailView) -> std::fmt::Result {
    writeln!(out, "-- product #{} --", detail.product_id)?;
    if detail.loading {
        return writeln!(out, "Loading product...");
    }
    if let Some(error) = &detail.error {
        return writeln!(out, "Could not load product: {error}");
    }
    if let Some(product) = &detail.product {
        writeln!(out, "{}", product.title)?;
        writeln!(
            out,
            "{:.2}  ★{:.1} ({} reviews)  {}",
            product.price, product.rating.rate, product.rating.count, product.category
        )?;
        writeln!(out, "{}", product.description)?;
        writeln!(
            out,
            "quantity: {}  {}",
            detail.quantity,
            if detail.is_favorite { "♥ favorite" } else { "" }
        )?;
    }
    Ok(())
}

fn write_cart(out: &mut String, lines: &[CartLineView], total: f64) -> std::fmt::Result {
    if lines.is_empty() {
        return Ok(());
    }
    writeln!(out, "-- cart --")?;
    for line in lines {
        writeln!(
            out,
            "#{:<4} {:<40} {:>3} x {:>8.2} = {:>9.2}",
            line.product_id, line.title, line.quantity, line.unit_price, line.line_total
        )?;
    }
    writeln!(out, "total: {total:.2}")
}
