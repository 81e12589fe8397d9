//! # Storefront Page
//!
//! Server-rendered HTML for `GET /`: one checkout link per product and a
//! form that opens the customer portal for an email address.

use shop_core::Product;

const PAGE_HEAD: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="UTF-8" />
    <title>Storefront</title>
    <script src="https://cdn.tailwindcss.com"></script>
  </head>
  <body class="bg-white flex flex-col items-center justify-center gap-16 min-h-screen">
    <div class="w-[360px] max-w-[90%] flex flex-col gap-3">"#;

const PAGE_TAIL: &str = r#"
    </div>
    <form action="/portal" method="get" class="flex gap-2">
      <input
        required
        type="email"
        name="email"
        placeholder="Email"
        class="px-4 py-2 text-base border rounded-lg w-[260px] focus:outline-none focus:border-black"
      />
      <button
        type="submit"
        class="px-6 py-2 text-base bg-black text-white rounded-lg hover:opacity-80 transition"
      >
        Open Customer Portal
      </button>
    </form>
  </body>
</html>"#;

/// Render the storefront page for a product list
pub fn render_storefront(products: &[Product]) -> String {
    let mut html = String::from(PAGE_HEAD);

    for product in products {
        html.push_str(&format!(
            r#"
      <a
        href="{}"
        target="_blank"
        class="block text-center px-4 py-3 border rounded-xl bg-gray-50 hover:bg-gray-100 text-gray-900 transition"
      >
        Buy {}
      </a>"#,
            html_escape(&product.checkout_path()),
            html_escape(&product.name)
        ));
    }

    html.push_str(PAGE_TAIL);
    html
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
