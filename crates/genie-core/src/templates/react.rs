//! React templates (function components, CSS modules, Zustand, Testing Library)

use super::{FileTemplate, TemplateSet};
use crate::framework::FrameworkVariant;
use crate::naming::CanonicalName;

pub(crate) static TEMPLATES: TemplateSet = TemplateSet {
    framework: FrameworkVariant::React,
    views_dir: "pages",
    stores_dir: "store",
    composables_dir: "hooks",

    component_file,
    component,
    stylesheet: Some(FileTemplate {
        file: stylesheet_file,
        content: stylesheet,
    }),
    test_file,
    component_test,
    index,
    loader_file,
    loader,

    routes,
    module_store,
    styles_main,

    store,
    composable: hook,
    test_case,
};

fn component_file(name: &CanonicalName) -> String {
    format!("{}.jsx", name)
}

fn stylesheet_file(name: &CanonicalName) -> String {
    format!("{}.module.scss", name)
}

fn test_file(name: &CanonicalName) -> String {
    format!("{}.test.jsx", name)
}

fn loader_file(name: &CanonicalName) -> String {
    format!("{}Loader.jsx", name)
}

fn index(name: &CanonicalName) -> String {
    format!("export {{ default }} from './{}'\n", name)
}

fn component(name: &CanonicalName) -> String {
    let class = name.css_class();
    format!(
        r#"import styles from './{name}.module.scss'

export default function {name}() {{
  return (
    <div className={{styles.{class}}}>
      <h2>{name}</h2>
    </div>
  )
}}
"#
    )
}

fn stylesheet(name: &CanonicalName) -> String {
    format!(
        ".{} {{\n  padding: 20px;\n\n  h2 {{\n    margin-bottom: 10px;\n  }}\n}}\n",
        name.css_class()
    )
}

fn component_test(name: &CanonicalName) -> String {
    format!(
        r#"import {{ describe, it, expect }} from 'vitest'
import {{ render, screen }} from '@testing-library/react'
import {name} from './{name}'

describe('{name}', () => {{
  it('renders successfully', () => {{
    render(<{name} />)
    expect(screen.getByText('{name}')).toBeInTheDocument()
  }})
}})
"#
    )
}

fn loader(name: &CanonicalName) -> String {
    let selector = name.css_class();
    format!(
        r#"import {{ createRoot }} from 'react-dom/client'
import {name} from './{name}'

export function load() {{
  const element = document.querySelector('{selector}')

  if (!element) {{
    return
  }}

  createRoot(element).render(<{name} {{...window['{selector}']}} />)
}}
"#
    )
}

fn routes(name: &CanonicalName) -> String {
    let path = name.css_class();
    format!(
        r#"import {{ lazy }} from 'react'

const {name}Page = lazy(() => import('./views/{name}Page'))

const routes = [
  {{
    path: '/{path}',
    element: <{name}Page />,
  }},
]

export default routes
"#
    )
}

fn module_store(name: &CanonicalName) -> String {
    store(name)
}

fn styles_main(name: &CanonicalName) -> String {
    format!("// {} module styles\n", name)
}

fn store(name: &CanonicalName) -> String {
    format!(
        r#"import {{ create }} from 'zustand'

export const use{name}Store = create((set) => ({{
  items: [],
  loading: false,
  error: null,

  addItem: (item) => set((state) => ({{ items: [...state.items, item] }})),
  removeItem: (id) => set((state) => ({{ items: state.items.filter((item) => item.id !== id) }})),
  setLoading: (loading) => set({{ loading }}),
  setError: (error) => set({{ error }}),
  reset: () => set({{ items: [], loading: false, error: null }}),
}}))
"#
    )
}

fn hook(name: &CanonicalName) -> String {
    let ident = name.camel();
    format!(
        r#"import {{ useState, useCallback }} from 'react'

export function {ident}() {{
  const [state, setState] = useState(null)
  const [loading, setLoading] = useState(false)
  const [error, setError] = useState(null)

  const reset = useCallback(() => {{
    setState(null)
    setError(null)
    setLoading(false)
  }}, [])

  return {{ state, loading, error, setState, setLoading, setError, reset }}
}}
"#
    )
}

fn test_case(name: &CanonicalName) -> String {
    format!(
        r#"import {{ describe, it, expect }} from 'vitest'

describe('{name}', () => {{
  it('works', () => {{
    expect(true).toBe(true)
  }})
}})
"#
    )
}
